//! Worker thread that executes backend commands and reports back as `UiEvent`s.

use std::{sync::Arc, thread};

use client_core::{poll_until_ready, PaperApi};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tokio::task::JoinHandle;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    api: Arc<dyn PaperApi>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                emit(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("failed to build runtime: {err}"),
                    )),
                );
                return;
            }
        };
        runtime.block_on(run_worker(api, cmd_rx, ui_tx));
    })
}

async fn run_worker(api: Arc<dyn PaperApi>, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    emit(&ui_tx, UiEvent::Info("Backend worker ready".to_string()));

    let mut poll_task: Option<JoinHandle<()>> = None;
    while let Ok(cmd) = cmd_rx.recv() {
        tracing::debug!(command = cmd.name(), "backend command");
        match cmd {
            BackendCommand::StartStatusPolling { interval } => {
                if poll_task.as_ref().is_some_and(|task| !task.is_finished()) {
                    continue;
                }
                let api = api.clone();
                let ui_tx = ui_tx.clone();
                poll_task = Some(tokio::spawn(async move {
                    poll_until_ready(api.as_ref(), interval, |result| {
                        emit(&ui_tx, UiEvent::Status(result));
                    })
                    .await;
                }));
            }
            BackendCommand::StopStatusPolling => {
                if let Some(task) = poll_task.take() {
                    task.abort();
                    tracing::info!("status polling stopped");
                }
            }
            BackendCommand::LoadPapers => {
                let api = api.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    emit(&ui_tx, UiEvent::Papers(api.papers().await));
                });
            }
            BackendCommand::Search(request) => {
                let api = api.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    emit(&ui_tx, UiEvent::Search(api.search(&request).await));
                });
            }
            BackendCommand::LookupMarkingSchemePage {
                ticket,
                year,
                question_number,
            } => {
                let api = api.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let result = api.lookup_marking_scheme_page(&year, question_number).await;
                    emit(&ui_tx, UiEvent::MarkingSchemeLookup { ticket, result });
                });
            }
            BackendCommand::ScheduleViewerNavigation {
                target,
                page,
                delay,
            } => {
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    emit(&ui_tx, UiEvent::ViewerNavigate { target, page });
                });
            }
            BackendCommand::DownloadPdf { target, path } => {
                let api = api.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let bytes = match api.fetch_pdf(&target).await {
                        Ok(bytes) => bytes,
                        Err(err) => {
                            emit(
                                &ui_tx,
                                UiEvent::Error(UiError::from_api_error(UiErrorContext::Download, &err)),
                            );
                            return;
                        }
                    };
                    match tokio::fs::write(&path, &bytes).await {
                        Ok(()) => {
                            tracing::info!(path = %path.display(), bytes = bytes.len(), "pdf saved");
                            emit(
                                &ui_tx,
                                UiEvent::PdfSaved {
                                    path,
                                    bytes: bytes.len(),
                                },
                            );
                        }
                        Err(err) => emit(
                            &ui_tx,
                            UiEvent::Error(UiError::from_message(
                                UiErrorContext::Download,
                                format!("could not write {}: {err}", path.display()),
                            )),
                        ),
                    }
                });
            }
        }
    }

    if let Some(task) = poll_task.take() {
        task.abort();
    }
    tracing::info!("ui command channel closed; backend worker exiting");
}

fn emit(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => tracing::warn!("ui event queue full; dropping event"),
        Err(TrySendError::Disconnected(_)) => tracing::debug!("ui event receiver gone"),
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
