//! Backend commands queued from UI to backend worker.

use std::{path::PathBuf, time::Duration};

use client_core::{LookupTicket, PdfTarget};
use shared::{domain::Year, protocol::SearchRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    /// Starts the status poll task unless one is already running.
    StartStatusPolling {
        interval: Duration,
    },
    StopStatusPolling,
    LoadPapers,
    Search(SearchRequest),
    LookupMarkingSchemePage {
        ticket: LookupTicket,
        year: Year,
        question_number: u32,
    },
    ScheduleViewerNavigation {
        target: PdfTarget,
        page: u32,
        delay: Duration,
    },
    DownloadPdf {
        target: PdfTarget,
        path: PathBuf,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::StartStatusPolling { .. } => "start_status_polling",
            BackendCommand::StopStatusPolling => "stop_status_polling",
            BackendCommand::LoadPapers => "load_papers",
            BackendCommand::Search(_) => "search",
            BackendCommand::LookupMarkingSchemePage { .. } => "lookup_marking_scheme_page",
            BackendCommand::ScheduleViewerNavigation { .. } => "schedule_viewer_navigation",
            BackendCommand::DownloadPdf { .. } => "download_pdf",
        }
    }
}
