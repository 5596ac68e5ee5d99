//! Backend-to-UI events and error modeling for the desktop shell.

use std::path::PathBuf;

use client_core::{ApiClientError, LookupTicket, PdfTarget};
use shared::protocol::{MarkingSchemeLookup, SearchResponse, StatusResponse, YearGroup};

pub enum UiEvent {
    Info(String),
    Status(Result<StatusResponse, ApiClientError>),
    Papers(Result<Vec<YearGroup>, ApiClientError>),
    Search(Result<SearchResponse, ApiClientError>),
    MarkingSchemeLookup {
        ticket: LookupTicket,
        result: Result<MarkingSchemeLookup, ApiClientError>,
    },
    ViewerNavigate {
        target: PdfTarget,
        page: u32,
    },
    PdfSaved {
        path: PathBuf,
        bytes: usize,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Download,
    Viewer,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("timeout")
            || lower.contains("timed out")
            || lower.contains("connection")
            || lower.contains("network")
            || lower.contains("unavailable")
            || lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else if lower.contains("invalid")
            || lower.contains("missing")
            || lower.contains("malformed")
            || lower.contains("not found")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_api_error(context: UiErrorContext, err: &ApiClientError) -> Self {
        let category = match err {
            ApiClientError::Transport { .. } | ApiClientError::ClientBuild(_) => {
                UiErrorCategory::Transport
            }
            ApiClientError::Status { .. }
            | ApiClientError::Decode { .. }
            | ApiClientError::InvalidUrl { .. } => UiErrorCategory::Validation,
        };
        let message = match err.backend_message() {
            Some(detail) => detail.to_string(),
            None => err.to_string(),
        };
        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Banner text: the message prefixed with where it happened.
    pub fn banner_text(&self) -> String {
        let prefix = match self.context {
            UiErrorContext::BackendStartup => "Backend worker",
            UiErrorContext::Download => "Download failed",
            UiErrorContext::Viewer => "PDF viewer",
            UiErrorContext::General => return self.message.clone(),
        };
        format!("{prefix}: {}", self.message)
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
