use shared::protocol::YearGroup;

pub const PAPERS_LOAD_FAILED: &str = "Failed to load papers";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaperBrowser {
    #[default]
    Loading,
    Loaded(Vec<YearGroup>),
    Failed(String),
}

impl PaperBrowser {
    pub fn apply(&mut self, result: Result<Vec<YearGroup>, crate::ApiClientError>) {
        *self = match result {
            Ok(groups) => {
                tracing::info!(years = groups.len(), "loaded available papers");
                PaperBrowser::Loaded(groups)
            }
            Err(err) => {
                tracing::error!("error loading papers: {err}");
                PaperBrowser::Failed(PAPERS_LOAD_FAILED.to_string())
            }
        };
    }
}
