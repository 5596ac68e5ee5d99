use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("invalid server url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}: {}", .message.as_deref().unwrap_or("no error detail"))]
    Status {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiClientError {
    /// Error text reported by the backend itself, if the failure was a non-OK response.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiClientError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_status(&self) -> bool {
        matches!(self, ApiClientError::Status { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiClientError::Transport { .. } | ApiClientError::ClientBuild(_)
        )
    }
}
