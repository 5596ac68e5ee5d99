//! Controller layer: the single owner of UI state. Transitions are synchronous and
//! return the side effects the shell must perform.

use std::time::Duration;

use shared::{
    domain::{PaperNumber, Year},
    protocol::{MarkingSchemeLookup, SearchRequest, SearchResponse, StatusResponse, YearGroup},
};

use crate::{config::ClientSettings, pdf::PdfTarget, view, ApiClientError};

pub mod modal;
pub mod navigation;
pub mod papers;
pub mod search;
pub mod status;

use modal::PdfModal;
use papers::PaperBrowser;
use search::{SearchPane, SearchRejected, EMPTY_QUERY_ALERT};
use status::StatusPoller;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupTicket(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CheckStatus,
    StopStatusPolling,
    LoadPapers,
    Search(SearchRequest),
    LookupMarkingSchemePage {
        ticket: LookupTicket,
        year: Year,
        question_number: u32,
    },
    LoadViewer(PdfTarget),
    ClearViewer,
    /// Best effort: ask the viewer to move to `page` once `delay` has passed,
    /// provided `target` is still the document on display.
    NavigateViewer {
        target: PdfTarget,
        page: u32,
        delay: Duration,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    OpenPdf {
        year: Year,
        paper: PaperNumber,
        page: Option<u32>,
    },
    OpenPdfWithQuestion {
        year: Year,
        paper: PaperNumber,
        page: u32,
        question_number: u32,
    },
    OpenMarkingScheme {
        year: Year,
        question_number: Option<u32>,
    },
    OpenMarkingSchemeFromModal,
    BackToQuestion,
    CloseModal,
    SubmitSearch,
    DismissAlert,
    ToggleDebug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub fn ctrl_shift(c: char) -> Self {
        Self {
            key: Key::Char(c),
            ctrl: true,
            shift: true,
        }
    }

    fn is_debug_toggle(&self) -> bool {
        self.ctrl && self.shift && matches!(self.key, Key::Char(c) if c.eq_ignore_ascii_case(&'d'))
    }
}

pub struct ViewController {
    status: StatusPoller,
    search: SearchPane,
    papers: PaperBrowser,
    modal: PdfModal,
    debug_mode: bool,
    alert: Option<String>,
}

impl ViewController {
    pub fn new(settings: &ClientSettings) -> Self {
        Self {
            status: StatusPoller::new(),
            search: SearchPane::new(settings.num_results),
            papers: PaperBrowser::default(),
            modal: PdfModal::default(),
            debug_mode: false,
            alert: None,
        }
    }

    pub fn status(&self) -> &StatusPoller {
        &self.status
    }

    pub fn search(&self) -> &SearchPane {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchPane {
        &mut self.search
    }

    pub fn papers(&self) -> &PaperBrowser {
        &self.papers
    }

    pub fn modal(&self) -> &PdfModal {
        &self.modal
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn search_enabled(&self) -> bool {
        self.status.is_ready()
    }

    pub fn start(&mut self) -> Vec<Effect> {
        self.papers = PaperBrowser::Loading;
        let mut effects = Vec::new();
        effects.extend(self.poll_status());
        effects.push(Effect::LoadPapers);
        effects
    }

    /// A status check, unless readiness has already been observed.
    pub fn poll_status(&mut self) -> Option<Effect> {
        self.status.should_poll().then_some(Effect::CheckStatus)
    }

    pub fn apply_status(&mut self, result: Result<StatusResponse, ApiClientError>) -> Vec<Effect> {
        match result {
            Ok(response) => {
                if self.status.apply_response(&response) {
                    return vec![Effect::StopStatusPolling];
                }
            }
            Err(err) => {
                tracing::error!("error checking status: {err}");
                self.status.apply_failure();
            }
        }
        Vec::new()
    }

    pub fn apply_search(&mut self, result: Result<SearchResponse, ApiClientError>) {
        self.search.finish(result);
    }

    pub fn apply_papers(&mut self, result: Result<Vec<YearGroup>, ApiClientError>) {
        self.papers.apply(result);
    }

    pub fn apply_marking_scheme_lookup(
        &mut self,
        ticket: LookupTicket,
        result: Result<MarkingSchemeLookup, ApiClientError>,
    ) -> Vec<Effect> {
        self.modal.apply_marking_scheme_lookup(ticket, result)
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.debug_mode = !self.debug_mode;
        tracing::info!(
            "debug mode: {}",
            if self.debug_mode { "ON" } else { "OFF" }
        );
        self.debug_mode
    }

    pub fn dispatch(&mut self, action: UiAction) -> Vec<Effect> {
        tracing::debug!(?action, "ui action");
        match action {
            UiAction::OpenPdf { year, paper, page } => self.modal.open_pdf(year, paper, page),
            UiAction::OpenPdfWithQuestion {
                year,
                paper,
                page,
                question_number,
            } => self
                .modal
                .open_pdf_with_question(year, paper, page, question_number),
            UiAction::OpenMarkingScheme {
                year,
                question_number,
            } => self.modal.open_marking_scheme(year, question_number),
            UiAction::OpenMarkingSchemeFromModal => self.modal.open_marking_scheme_from_modal(),
            UiAction::BackToQuestion => self.modal.back_to_question(),
            UiAction::CloseModal => self.modal.close(),
            UiAction::SubmitSearch => self.submit_search(),
            UiAction::DismissAlert => {
                self.alert = None;
                Vec::new()
            }
            UiAction::ToggleDebug => {
                self.toggle_debug();
                Vec::new()
            }
        }
    }

    pub fn handle_key(&mut self, chord: KeyChord) -> Vec<Effect> {
        if chord.key == Key::Escape && self.modal.is_open() {
            return self.modal.close();
        }
        if chord.is_debug_toggle() {
            self.toggle_debug();
        }
        Vec::new()
    }

    fn submit_search(&mut self) -> Vec<Effect> {
        match self.search.begin(self.search_enabled()) {
            Ok(request) => vec![Effect::Search(request)],
            Err(SearchRejected::EmptyQuery) => {
                self.alert = Some(EMPTY_QUERY_ALERT.to_string());
                Vec::new()
            }
            Err(SearchRejected::NotReady) => {
                tracing::debug!("search submitted before backend was ready");
                Vec::new()
            }
        }
    }

    pub fn render(&self) -> view::AppView {
        view::render(self)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
