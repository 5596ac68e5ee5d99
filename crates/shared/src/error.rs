use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body the backend sends alongside any non-OK status.
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{error}")]
pub struct ApiErrorBody {
    pub error: String,
    /// Processing status, present when the backend refuses work while indexing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ApiErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: None,
        }
    }
}
