//! PDF documents served by the backend and the viewer seam that displays them.

use shared::domain::{PaperNumber, Year};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PdfTarget {
    Paper {
        year: Year,
        paper: PaperNumber,
        page: Option<u32>,
    },
    MarkingScheme {
        year: Year,
        page: Option<u32>,
    },
}

impl PdfTarget {
    pub fn paper(year: Year, paper: PaperNumber, page: Option<u32>) -> Self {
        PdfTarget::Paper { year, paper, page }
    }

    pub fn marking_scheme(year: Year, page: Option<u32>) -> Self {
        PdfTarget::MarkingScheme { year, page }
    }

    pub fn page(&self) -> Option<u32> {
        match self {
            PdfTarget::Paper { page, .. } | PdfTarget::MarkingScheme { page, .. } => *page,
        }
    }

    /// Path of the document on the API, e.g. `/api/pdf/2019/1/5`.
    pub fn api_path(&self) -> String {
        let mut path = match self {
            PdfTarget::Paper { year, paper, .. } => format!("/api/pdf/{year}/{paper}"),
            PdfTarget::MarkingScheme { year, .. } => format!("/api/markingscheme/{year}"),
        };
        if let Some(page) = self.page() {
            path.push_str(&format!("/{page}"));
        }
        path
    }

    /// API path plus the `#page=` fragment PDF viewers use to open at a page.
    pub fn viewer_path(&self) -> String {
        match self.page() {
            Some(page) => format!("{}#page={page}", self.api_path()),
            None => self.api_path(),
        }
    }

    pub fn suggested_file_name(&self) -> String {
        match self {
            PdfTarget::Paper { year, paper, .. } => format!("{year}-paper{paper}.pdf"),
            PdfTarget::MarkingScheme { year, .. } => format!("{year}-markingscheme.pdf"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("no document is loaded in the viewer")]
    NotLoaded,
    #[error("failed to launch viewer: {0}")]
    Launch(#[from] std::io::Error),
}

/// Where the modal's document is displayed.
pub trait PdfViewer {
    fn load(&mut self, url: &str) -> Result<(), ViewerError>;
    fn clear(&mut self);
    fn source(&self) -> Option<&str>;
    fn go_to_page(&mut self, page: u32) -> Result<(), ViewerError>;
}

/// Moves the viewer to `page` if it can; the document stays shown either way.
pub fn navigate_best_effort(viewer: &mut dyn PdfViewer, page: u32) -> bool {
    match viewer.go_to_page(page) {
        Ok(()) => {
            tracing::debug!(page, "viewer moved to page");
            true
        }
        Err(err) => {
            tracing::info!(page, "could not navigate to specific page automatically: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubViewer {
        source: Option<String>,
        current_page: Option<u32>,
    }

    impl PdfViewer for StubViewer {
        fn load(&mut self, url: &str) -> Result<(), ViewerError> {
            self.source = Some(url.to_string());
            Ok(())
        }

        fn clear(&mut self) {
            self.source = None;
        }

        fn source(&self) -> Option<&str> {
            self.source.as_deref()
        }

        fn go_to_page(&mut self, page: u32) -> Result<(), ViewerError> {
            if self.source.is_none() {
                return Err(ViewerError::NotLoaded);
            }
            self.current_page = Some(page);
            Ok(())
        }
    }

    #[test]
    fn paper_paths_carry_page_segment_and_fragment() {
        let target = PdfTarget::paper(Year::from("2019"), PaperNumber::from("1"), Some(5));
        assert_eq!(target.api_path(), "/api/pdf/2019/1/5");
        assert_eq!(target.viewer_path(), "/api/pdf/2019/1/5#page=5");
        assert_eq!(target.suggested_file_name(), "2019-paper1.pdf");
    }

    #[test]
    fn full_marking_scheme_has_no_fragment() {
        let target = PdfTarget::marking_scheme(Year::from("2020"), None);
        assert_eq!(target.api_path(), "/api/markingscheme/2020");
        assert_eq!(target.viewer_path(), "/api/markingscheme/2020");
    }

    #[test]
    fn navigation_without_a_document_is_ignored() {
        let mut viewer = StubViewer {
            source: None,
            current_page: None,
        };
        assert!(!navigate_best_effort(&mut viewer, 3));
        assert_eq!(viewer.source(), None);
        assert_eq!(viewer.current_page, None);
    }

    #[test]
    fn page_navigation_succeeds_when_supported() {
        let mut viewer = StubViewer {
            source: Some("doc".to_string()),
            current_page: None,
        };
        assert!(navigate_best_effort(&mut viewer, 7));
        assert_eq!(viewer.current_page, Some(7));
    }
}
