use shared::protocol::StatusResponse;

pub const CONNECTION_ERROR_STATUS: &str = "Error connecting to server";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Ready,
    Error,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusStyle {
    Ready,
    Error,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusIndicator {
    pub icon: StatusIcon,
    pub text: String,
    pub style: StatusStyle,
}

impl StatusIndicator {
    fn connecting() -> Self {
        Self {
            icon: StatusIcon::Pending,
            text: "Connecting to server...".to_string(),
            style: StatusStyle::Neutral,
        }
    }

    pub fn from_response(response: &StatusResponse) -> Self {
        let (icon, style) = if response.ready {
            (StatusIcon::Ready, StatusStyle::Ready)
        } else if response.status.contains("Error") {
            (StatusIcon::Error, StatusStyle::Error)
        } else {
            (StatusIcon::Pending, StatusStyle::Neutral)
        };
        Self {
            icon,
            text: response.status.clone(),
            style,
        }
    }
}

/// Tracks backend readiness; once ready has been seen it stays ready and refuses further checks.
#[derive(Debug, Clone)]
pub struct StatusPoller {
    ready: bool,
    indicator: StatusIndicator,
}

impl Default for StatusPoller {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusPoller {
    pub fn new() -> Self {
        Self {
            ready: false,
            indicator: StatusIndicator::connecting(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn indicator(&self) -> &StatusIndicator {
        &self.indicator
    }

    pub fn should_poll(&self) -> bool {
        !self.ready
    }

    /// Returns true exactly once: on the first ready response.
    pub fn apply_response(&mut self, response: &StatusResponse) -> bool {
        if self.ready {
            tracing::debug!("ignoring status response after backend became ready");
            return false;
        }
        self.indicator = StatusIndicator::from_response(response);
        if response.ready {
            self.ready = true;
            tracing::info!(status = %response.status, "backend ready");
            return true;
        }
        false
    }

    pub fn apply_failure(&mut self) {
        if self.ready {
            return;
        }
        self.indicator = StatusIndicator::from_response(&StatusResponse {
            status: CONNECTION_ERROR_STATUS.to_string(),
            ready: false,
            is_processing: false,
        });
    }
}
