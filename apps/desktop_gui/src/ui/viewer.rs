//! Desktop PDF viewer: remembers the document URL and hands it to the system viewer.

use client_core::{PdfViewer, ViewerError};

#[derive(Debug, Clone, Default)]
pub struct DesktopPdfViewer {
    source: Option<String>,
    auto_open: bool,
}

impl DesktopPdfViewer {
    pub fn new(auto_open: bool) -> Self {
        Self {
            source: None,
            auto_open,
        }
    }

    pub fn open_external(&self) -> Result<(), ViewerError> {
        let url = self.source.as_deref().ok_or(ViewerError::NotLoaded)?;
        open_in_system_viewer(url)
    }
}

impl PdfViewer for DesktopPdfViewer {
    fn load(&mut self, url: &str) -> Result<(), ViewerError> {
        self.source = Some(url.to_string());
        if self.auto_open {
            open_in_system_viewer(url)?;
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.source = None;
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Points the stored URL at `page`; the next "Open in viewer" lands there.
    fn go_to_page(&mut self, page: u32) -> Result<(), ViewerError> {
        let source = self.source.as_mut().ok_or(ViewerError::NotLoaded)?;
        *source = with_page_fragment(source, page);
        Ok(())
    }
}

pub fn with_page_fragment(url: &str, page: u32) -> String {
    let base = url.split_once('#').map_or(url, |(base, _)| base);
    format!("{base}#page={page}")
}

pub fn open_in_system_viewer(target: &str) -> Result<(), ViewerError> {
    #[cfg(target_os = "windows")]
    let result = std::process::Command::new("cmd")
        .args(["/C", "start", "", target])
        .spawn();

    #[cfg(target_os = "macos")]
    let result = std::process::Command::new("open").arg(target).spawn();

    #[cfg(all(unix, not(target_os = "macos")))]
    let result = std::process::Command::new("xdg-open").arg(target).spawn();

    result.map(|_| ()).map_err(|err| {
        tracing::warn!(target, "failed to open external viewer: {err}");
        ViewerError::Launch(err)
    })
}

#[cfg(test)]
#[path = "tests/viewer_tests.rs"]
mod tests;
