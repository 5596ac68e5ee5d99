use std::time::Duration;

use shared::protocol::StatusResponse;
use tokio::time::MissedTickBehavior;

use crate::{ApiClientError, PaperApi};

/// Checks `/api/status` immediately and then every `interval` until the backend
/// reports ready. Failures are handed to `on_status` and polling continues.
pub async fn poll_until_ready<F>(
    api: &dyn PaperApi,
    interval: Duration,
    mut on_status: F,
) -> StatusResponse
where
    F: FnMut(Result<StatusResponse, ApiClientError>) + Send,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut attempts: u64 = 0;
    loop {
        ticker.tick().await;
        attempts += 1;
        let result = api.status().await;
        let ready = match &result {
            Ok(status) if status.ready => Some(status.clone()),
            Ok(status) => {
                tracing::debug!(attempts, status = %status.status, "backend not ready");
                None
            }
            Err(err) => {
                tracing::debug!(attempts, "status check failed: {err}");
                None
            }
        };
        on_status(result);
        if let Some(status) = ready {
            tracing::info!(attempts, "backend ready");
            return status;
        }
    }
}

#[cfg(test)]
#[path = "tests/poll_tests.rs"]
mod tests;
