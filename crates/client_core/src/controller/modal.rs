use std::time::Duration;

use shared::{
    domain::{PaperNumber, Year},
    protocol::MarkingSchemeLookup,
};
use tracing::{debug, warn};

use super::{
    navigation::{ContextKind, NavigationContext},
    Effect, LookupTicket,
};
use crate::{pdf::PdfTarget, ApiClientError};

/// Time given to the viewer to load a paper before asking it to change page.
pub const PAPER_NAVIGATION_DELAY: Duration = Duration::from_millis(1000);
/// Marking schemes are larger, so the viewer gets longer.
pub const MARKING_SCHEME_NAVIGATION_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    ViewingPaper,
    ViewingQuestion,
    ViewingMarkingScheme,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingLookup {
    ticket: LookupTicket,
    year: Year,
    question_number: u32,
}

#[derive(Debug, Clone, Default)]
pub struct PdfModal {
    open: bool,
    context: NavigationContext,
    title: String,
    subtitle: String,
    subtitle_loading: bool,
    viewer: Option<PdfTarget>,
    show_view_marking_scheme: bool,
    show_back_to_question: bool,
    pending_lookup: Option<PendingLookup>,
    next_ticket: u64,
}

impl PdfModal {
    pub fn state(&self) -> ModalState {
        if !self.open {
            return ModalState::Closed;
        }
        match self.context.kind {
            ContextKind::None => ModalState::ViewingPaper,
            ContextKind::Question => ModalState::ViewingQuestion,
            ContextKind::MarkingScheme => ModalState::ViewingMarkingScheme,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn context(&self) -> &NavigationContext {
        &self.context
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn is_subtitle_loading(&self) -> bool {
        self.subtitle_loading
    }

    pub fn viewer(&self) -> Option<&PdfTarget> {
        self.viewer.as_ref()
    }

    pub fn shows_view_marking_scheme(&self) -> bool {
        self.show_view_marking_scheme
    }

    pub fn shows_back_to_question(&self) -> bool {
        self.show_back_to_question
    }

    pub fn has_pending_lookup(&self) -> bool {
        self.pending_lookup.is_some()
    }

    pub fn open_pdf(&mut self, year: Year, paper: PaperNumber, page: Option<u32>) -> Vec<Effect> {
        self.pending_lookup = None;
        self.context = NavigationContext::paper(year.clone(), paper.clone(), page);
        self.show_paper(year, paper, page)
    }

    pub fn open_pdf_with_question(
        &mut self,
        year: Year,
        paper: PaperNumber,
        page: u32,
        question_number: u32,
    ) -> Vec<Effect> {
        self.pending_lookup = None;
        self.context =
            NavigationContext::question(year.clone(), paper.clone(), page, question_number);
        let effects = self.show_paper(year.clone(), paper.clone(), Some(page));

        self.title = format!("{year} - Paper {paper}");
        self.subtitle = format!("Question {question_number} (Page {page})");
        self.show_view_marking_scheme = true;
        self.show_back_to_question = false;
        effects
    }

    pub fn open_marking_scheme(&mut self, year: Year, question_number: Option<u32>) -> Vec<Effect> {
        self.context = NavigationContext::marking_scheme(year.clone(), question_number, &self.context);
        self.open = true;
        self.title = format!("{year} - Marking Scheme");
        self.show_view_marking_scheme = false;
        self.show_back_to_question = question_number.is_some() && self.context.previous.is_some();

        let Some(question_number) = question_number else {
            self.pending_lookup = None;
            self.subtitle.clear();
            self.subtitle_loading = false;
            return self.show_full_marking_scheme(year);
        };

        self.subtitle = format!("Finding solution for Question {question_number}...");
        self.subtitle_loading = true;
        self.next_ticket += 1;
        let ticket = LookupTicket(self.next_ticket);
        self.pending_lookup = Some(PendingLookup {
            ticket,
            year: year.clone(),
            question_number,
        });
        vec![Effect::LookupMarkingSchemePage {
            ticket,
            year,
            question_number,
        }]
    }

    pub fn apply_marking_scheme_lookup(
        &mut self,
        ticket: LookupTicket,
        result: Result<MarkingSchemeLookup, ApiClientError>,
    ) -> Vec<Effect> {
        let pending = match self.pending_lookup.take() {
            Some(pending) if pending.ticket == ticket => pending,
            other => {
                self.pending_lookup = other;
                debug!(ticket = ticket.0, "discarding stale marking scheme lookup");
                return Vec::new();
            }
        };
        self.subtitle_loading = false;
        let PendingLookup {
            year,
            question_number,
            ..
        } = pending;

        match result {
            Ok(MarkingSchemeLookup {
                found: true,
                page: Some(page),
                ..
            }) => {
                self.subtitle = format!("Solution for Question {question_number} (Page {page})");
                self.context.page = Some(page);
                let target = PdfTarget::marking_scheme(year, Some(page));
                self.viewer = Some(target.clone());
                vec![
                    Effect::LoadViewer(target.clone()),
                    Effect::NavigateViewer {
                        target,
                        page,
                        delay: MARKING_SCHEME_NAVIGATION_DELAY,
                    },
                ]
            }
            Ok(lookup) => {
                self.subtitle = lookup
                    .message
                    .unwrap_or_else(|| not_found_caption(question_number));
                self.show_full_marking_scheme(year)
            }
            Err(err) if err.is_status() => {
                warn!(question_number, "marking scheme lookup rejected: {err}");
                self.subtitle = not_found_caption(question_number);
                self.show_full_marking_scheme(year)
            }
            Err(err) => {
                warn!(question_number, "error finding question in marking scheme: {err}");
                self.subtitle = format!(
                    "Error finding Question {question_number}, showing full marking scheme"
                );
                self.show_full_marking_scheme(year)
            }
        }
    }

    pub fn open_marking_scheme_from_modal(&mut self) -> Vec<Effect> {
        match self.context.current_question() {
            Some(question) => {
                self.open_marking_scheme(question.year, Some(question.question_number))
            }
            None => Vec::new(),
        }
    }

    pub fn back_to_question(&mut self) -> Vec<Effect> {
        match self.context.previous_question() {
            Some(question) => self.open_pdf_with_question(
                question.year,
                question.paper,
                question.page,
                question.question_number,
            ),
            None => Vec::new(),
        }
    }

    pub fn close(&mut self) -> Vec<Effect> {
        *self = Self {
            next_ticket: self.next_ticket,
            ..Self::default()
        };
        vec![Effect::ClearViewer]
    }

    fn show_paper(&mut self, year: Year, paper: PaperNumber, page: Option<u32>) -> Vec<Effect> {
        self.title = match page {
            Some(page) => format!("{year} - Paper {paper} (Page {page})"),
            None => format!("{year} - Paper {paper}"),
        };
        self.subtitle.clear();
        self.subtitle_loading = false;
        self.open = true;
        self.show_view_marking_scheme = false;
        self.show_back_to_question = false;

        let target = PdfTarget::paper(year, paper, page);
        self.viewer = Some(target.clone());
        let mut effects = vec![Effect::LoadViewer(target.clone())];
        if let Some(page) = page {
            effects.push(Effect::NavigateViewer {
                target,
                page,
                delay: PAPER_NAVIGATION_DELAY,
            });
        }
        effects
    }

    fn show_full_marking_scheme(&mut self, year: Year) -> Vec<Effect> {
        let target = PdfTarget::marking_scheme(year, None);
        self.viewer = Some(target.clone());
        vec![Effect::LoadViewer(target)]
    }
}

fn not_found_caption(question_number: u32) -> String {
    format!("Question {question_number} not found, showing full marking scheme")
}
