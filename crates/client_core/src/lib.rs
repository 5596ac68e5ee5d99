use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::Year,
    error::ApiErrorBody,
    protocol::{MarkingSchemeLookup, SearchRequest, SearchResponse, StatusResponse, YearGroup},
};
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod pdf;
pub mod poll;
pub mod view;

pub use config::ClientSettings;
pub use controller::{Effect, KeyChord, LookupTicket, UiAction, ViewController};
pub use error::ApiClientError;
pub use pdf::{navigate_best_effort, PdfTarget, PdfViewer, ViewerError};
pub use poll::poll_until_ready;

/// The exam paper backend as seen by the client.
#[async_trait]
pub trait PaperApi: Send + Sync {
    async fn status(&self) -> Result<StatusResponse, ApiClientError>;
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiClientError>;
    async fn papers(&self) -> Result<Vec<YearGroup>, ApiClientError>;
    async fn lookup_marking_scheme_page(
        &self,
        year: &Year,
        question_number: u32,
    ) -> Result<MarkingSchemeLookup, ApiClientError>;
    async fn fetch_pdf(&self, target: &PdfTarget) -> Result<Vec<u8>, ApiClientError>;
}

#[derive(Clone)]
pub struct HttpPaperApi {
    http: Client,
    server_url: String,
}

impl HttpPaperApi {
    pub fn new(server_url: &str) -> Result<Self, ApiClientError> {
        Self::with_timeout(server_url, None)
    }

    pub fn with_timeout(
        server_url: &str,
        request_timeout: Option<Duration>,
    ) -> Result<Self, ApiClientError> {
        let server_url = normalize_server_url(server_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiClientError::ClientBuild)?;
        Ok(Self { http, server_url })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ApiClientError> {
        Self::with_timeout(&settings.server_url, settings.request_timeout)
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Absolute URL handed to a PDF viewer, including the `#page=` fragment.
    pub fn viewer_url(&self, target: &PdfTarget) -> String {
        format!("{}{}", self.server_url, target.viewer_path())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.server_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiClientError> {
        let url = self.endpoint(path);
        debug!(endpoint = path, "GET");
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiClientError::Transport {
                endpoint: path.to_string(),
                source,
            })?;
        decode_json(path, res).await
    }
}

/// Validates the base URL and strips trailing slashes so API paths can be appended.
pub fn normalize_server_url(raw: &str) -> Result<String, ApiClientError> {
    let trimmed = raw.trim();
    Url::parse(trimmed).map_err(|source| ApiClientError::InvalidUrl {
        url: trimmed.to_string(),
        source,
    })?;
    Ok(trimmed.trim_end_matches('/').to_string())
}

async fn read_body(path: &str, res: Response) -> Result<(u16, Vec<u8>), ApiClientError> {
    let status = res.status().as_u16();
    let body = res
        .bytes()
        .await
        .map_err(|source| ApiClientError::Transport {
            endpoint: path.to_string(),
            source,
        })?;
    Ok((status, body.to_vec()))
}

async fn decode_json<T: DeserializeOwned>(path: &str, res: Response) -> Result<T, ApiClientError> {
    let ok = res.status().is_success();
    let (status, body) = read_body(path, res).await?;
    if !ok {
        return Err(status_error(path, status, &body));
    }
    serde_json::from_slice(&body).map_err(|source| ApiClientError::Decode {
        endpoint: path.to_string(),
        source,
    })
}

fn status_error(path: &str, status: u16, body: &[u8]) -> ApiClientError {
    let message = serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .map(|body| body.error);
    warn!(endpoint = path, status, "backend returned an error response");
    ApiClientError::Status {
        endpoint: path.to_string(),
        status,
        message,
    }
}

#[async_trait]
impl PaperApi for HttpPaperApi {
    async fn status(&self) -> Result<StatusResponse, ApiClientError> {
        self.get_json("/api/status").await
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiClientError> {
        let path = "/api/search";
        debug!(
            endpoint = path,
            num_results = request.num_results,
            "POST search"
        );
        let res = self
            .http
            .post(self.endpoint(path))
            .json(request)
            .send()
            .await
            .map_err(|source| ApiClientError::Transport {
                endpoint: path.to_string(),
                source,
            })?;
        decode_json(path, res).await
    }

    async fn papers(&self) -> Result<Vec<YearGroup>, ApiClientError> {
        self.get_json("/api/papers").await
    }

    async fn lookup_marking_scheme_page(
        &self,
        year: &Year,
        question_number: u32,
    ) -> Result<MarkingSchemeLookup, ApiClientError> {
        self.get_json(&format!(
            "/api/markingscheme/{year}/question/{question_number}"
        ))
        .await
    }

    async fn fetch_pdf(&self, target: &PdfTarget) -> Result<Vec<u8>, ApiClientError> {
        let path = target.api_path();
        debug!(endpoint = %path, "GET pdf");
        let res = self
            .http
            .get(self.endpoint(&path))
            .send()
            .await
            .map_err(|source| ApiClientError::Transport {
                endpoint: path.clone(),
                source,
            })?;
        let ok = res.status().is_success();
        let (status, body) = read_body(&path, res).await?;
        if !ok {
            return Err(status_error(&path, status, &body));
        }
        Ok(body)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
