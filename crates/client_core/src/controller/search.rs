use shared::protocol::{SearchRequest, SearchResponse};

use crate::{config::clamp_num_results, ApiClientError};

pub const RESULT_COUNT_OPTIONS: [u32; 4] = [5, 10, 15, 20];
pub const EMPTY_QUERY_ALERT: &str = "Please enter a search query";
pub const SEARCH_FAILED: &str = "Search failed";
pub const NETWORK_ERROR: &str = "Network error occurred";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(SearchResponse),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRejected {
    EmptyQuery,
    NotReady,
}

#[derive(Debug, Clone)]
pub struct SearchPane {
    query_input: String,
    num_results: u32,
    in_flight: u32,
    current_query: Option<String>,
    outcome: Option<SearchOutcome>,
}

impl SearchPane {
    pub fn new(num_results: u32) -> Self {
        Self {
            query_input: String::new(),
            num_results: clamp_num_results(num_results),
            in_flight: 0,
            current_query: None,
            outcome: None,
        }
    }

    pub fn query_input(&self) -> &str {
        &self.query_input
    }

    pub fn query_input_mut(&mut self) -> &mut String {
        &mut self.query_input
    }

    pub fn set_query_input(&mut self, query: impl Into<String>) {
        self.query_input = query.into();
    }

    pub fn num_results(&self) -> u32 {
        self.num_results
    }

    pub fn set_num_results(&mut self, num_results: u32) {
        self.num_results = clamp_num_results(num_results);
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn current_query(&self) -> Option<&str> {
        self.current_query.as_deref()
    }

    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// Last successful response, kept for re-rendering when the debug flag flips.
    pub fn last_results(&self) -> Option<&SearchResponse> {
        match &self.outcome {
            Some(SearchOutcome::Results(response)) => Some(response),
            _ => None,
        }
    }

    pub fn begin(&mut self, search_enabled: bool) -> Result<SearchRequest, SearchRejected> {
        if !search_enabled {
            return Err(SearchRejected::NotReady);
        }
        let query = self.query_input.trim();
        if query.is_empty() {
            return Err(SearchRejected::EmptyQuery);
        }
        self.current_query = Some(query.to_string());
        self.in_flight += 1;
        Ok(SearchRequest {
            query: query.to_string(),
            num_results: self.num_results,
        })
    }

    pub fn finish(&mut self, result: Result<SearchResponse, ApiClientError>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.outcome = Some(match result {
            Ok(response) => {
                tracing::info!(
                    query = %response.query,
                    total_found = response.total_found,
                    "search completed"
                );
                SearchOutcome::Results(response)
            }
            Err(err) if err.is_status() => {
                tracing::warn!("search rejected by backend: {err}");
                SearchOutcome::Failed(err.backend_message().unwrap_or(SEARCH_FAILED).to_string())
            }
            Err(err) => {
                tracing::error!("search error: {err}");
                SearchOutcome::Failed(NETWORK_ERROR.to_string())
            }
        });
    }
}
