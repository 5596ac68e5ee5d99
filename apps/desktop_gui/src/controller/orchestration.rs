//! Routing of controller effects to the viewer or the backend command queue.

use std::time::Duration;

use client_core::Effect;
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Where an effect is carried out. Viewer work stays on the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectRoute {
    Backend(BackendCommand),
    LoadViewer(client_core::PdfTarget),
    ClearViewer,
}

pub fn route_effect(effect: Effect, poll_interval: Duration) -> EffectRoute {
    match effect {
        // The poll task checks immediately on start, so a one-off check just
        // makes sure it is running.
        Effect::CheckStatus => EffectRoute::Backend(BackendCommand::StartStatusPolling {
            interval: poll_interval,
        }),
        Effect::StopStatusPolling => EffectRoute::Backend(BackendCommand::StopStatusPolling),
        Effect::LoadPapers => EffectRoute::Backend(BackendCommand::LoadPapers),
        Effect::Search(request) => EffectRoute::Backend(BackendCommand::Search(request)),
        Effect::LookupMarkingSchemePage {
            ticket,
            year,
            question_number,
        } => EffectRoute::Backend(BackendCommand::LookupMarkingSchemePage {
            ticket,
            year,
            question_number,
        }),
        Effect::NavigateViewer {
            target,
            page,
            delay,
        } => EffectRoute::Backend(BackendCommand::ScheduleViewerNavigation {
            target,
            page,
            delay,
        }),
        Effect::LoadViewer(target) => EffectRoute::LoadViewer(target),
        Effect::ClearViewer => EffectRoute::ClearViewer,
    }
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend command queue full");
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            *status = "Backend command processor disconnected; restart the app".to_string();
        }
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
