//! What the PDF modal is showing, plus the single step of history used by "back to question".

use shared::domain::{PaperNumber, Year};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextKind {
    #[default]
    None,
    Question,
    MarkingScheme,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationContext {
    pub kind: ContextKind,
    pub year: Option<Year>,
    pub paper: Option<PaperNumber>,
    pub question_number: Option<u32>,
    pub page: Option<u32>,
    /// Only ever a question view, and never one that carries history of its own.
    pub previous: Option<Box<NavigationContext>>,
}

impl NavigationContext {
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn is_cleared(&self) -> bool {
        *self == Self::cleared()
    }

    pub fn paper(year: Year, paper: PaperNumber, page: Option<u32>) -> Self {
        Self {
            kind: ContextKind::None,
            year: Some(year),
            paper: Some(paper),
            question_number: None,
            page,
            previous: None,
        }
    }

    pub fn question(year: Year, paper: PaperNumber, page: u32, question_number: u32) -> Self {
        Self {
            kind: ContextKind::Question,
            year: Some(year),
            paper: Some(paper),
            question_number: Some(question_number),
            page: Some(page),
            previous: None,
        }
    }

    /// Context for a marking scheme opened while `from` was on screen.
    pub fn marking_scheme(
        year: Year,
        question_number: Option<u32>,
        from: &NavigationContext,
    ) -> Self {
        let previous = (from.kind == ContextKind::Question)
            .then(|| Box::new(from.without_history()));
        Self {
            kind: ContextKind::MarkingScheme,
            year: Some(year),
            paper: from.paper.clone(),
            question_number,
            page: None,
            previous,
        }
    }

    pub fn without_history(&self) -> Self {
        Self {
            previous: None,
            ..self.clone()
        }
    }

    /// The question view to return to, with everything needed to reopen it.
    pub fn previous_question(&self) -> Option<QuestionLocation> {
        self.previous.as_deref().and_then(QuestionLocation::from_context)
    }

    pub fn current_question(&self) -> Option<QuestionLocation> {
        QuestionLocation::from_context(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionLocation {
    pub year: Year,
    pub paper: PaperNumber,
    pub page: u32,
    pub question_number: u32,
}

impl QuestionLocation {
    fn from_context(context: &NavigationContext) -> Option<Self> {
        if context.kind != ContextKind::Question {
            return None;
        }
        Some(Self {
            year: context.year.clone()?,
            paper: context.paper.clone()?,
            page: context.page?,
            question_number: context.question_number?,
        })
    }
}
