//! Pure mapping from controller state to the tree the shell draws.

use shared::protocol::{SearchResponse, SearchResult, YearGroup};

use crate::{
    controller::{
        papers::PaperBrowser,
        search::{SearchOutcome, RESULT_COUNT_OPTIONS},
        status::StatusIndicator,
        UiAction, ViewController,
    },
    format::{format_percentage, format_question},
    pdf::PdfTarget,
};

pub const NO_RESULTS: &str = "No results found. Try a different search query.";
pub const NO_PAPERS: &str = "No papers available";
pub const SEARCH_ERROR_HEADER: &str = "Search Error";

#[derive(Debug, Clone, PartialEq)]
pub struct AppView {
    pub status: StatusIndicator,
    pub search: SearchBarView,
    pub results: ResultsView,
    pub papers: PapersView,
    pub modal: Option<ModalView>,
    pub alert: Option<String>,
    pub debug_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarView {
    pub enabled: bool,
    pub busy: bool,
    pub num_results: u32,
    pub result_count_options: &'static [u32],
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Hidden,
    Error {
        header: String,
        message: String,
    },
    Empty {
        header: String,
        message: &'static str,
    },
    List {
        header: String,
        entries: Vec<ResultEntryView>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreView {
    Total(String),
    Breakdown {
        total: String,
        semantic: String,
        keyword: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultEntryView {
    pub rank: usize,
    pub score: ScoreView,
    pub year: String,
    pub paper: String,
    pub question_number: u32,
    pub page: u32,
    pub question_text: String,
    pub jump_label: String,
    pub jump: UiAction,
    pub view_marking_scheme: UiAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PapersView {
    Loading,
    Failed(String),
    Empty(&'static str),
    Grid(Vec<YearCardView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperLinkView {
    pub label: String,
    pub action: UiAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearCardView {
    pub year: String,
    pub papers: Vec<PaperLinkView>,
    pub marking_scheme: Option<PaperLinkView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub subtitle: String,
    pub subtitle_loading: bool,
    pub viewer: Option<PdfTarget>,
    pub show_view_marking_scheme: bool,
    pub show_back_to_question: bool,
}

pub fn render(controller: &ViewController) -> AppView {
    let search = controller.search();
    AppView {
        status: controller.status().indicator().clone(),
        search: SearchBarView {
            enabled: controller.search_enabled(),
            busy: search.is_busy(),
            num_results: search.num_results(),
            result_count_options: &RESULT_COUNT_OPTIONS,
        },
        results: render_results(search.outcome(), controller.debug_mode()),
        papers: render_papers(controller.papers()),
        modal: render_modal(controller),
        alert: controller.alert().map(str::to_string),
        debug_mode: controller.debug_mode(),
    }
}

pub fn render_results(outcome: Option<&SearchOutcome>, debug_mode: bool) -> ResultsView {
    match outcome {
        None => ResultsView::Hidden,
        Some(SearchOutcome::Failed(message)) => ResultsView::Error {
            header: SEARCH_ERROR_HEADER.to_string(),
            message: message.clone(),
        },
        Some(SearchOutcome::Results(response)) => render_response(response, debug_mode),
    }
}

fn render_response(response: &SearchResponse, debug_mode: bool) -> ResultsView {
    let header = format!(
        "Found {} results for \"{}\"",
        response.total_found, response.query
    );
    if response.results.is_empty() {
        return ResultsView::Empty {
            header,
            message: NO_RESULTS,
        };
    }
    ResultsView::List {
        header,
        entries: response
            .results
            .iter()
            .enumerate()
            .map(|(index, result)| render_result_entry(result, index + 1, debug_mode))
            .collect(),
    }
}

pub fn render_result_entry(result: &SearchResult, rank: usize, debug_mode: bool) -> ResultEntryView {
    let total = format_percentage(result.similarity_score);
    let score = match (debug_mode, result.semantic_score, result.keyword_score) {
        (true, Some(semantic), Some(keyword)) => ScoreView::Breakdown {
            total: format!("{total}% total"),
            semantic: format!("Semantic: {}%", format_percentage(semantic)),
            keyword: format!("Keyword: {}%", format_percentage(keyword)),
        },
        _ => ScoreView::Total(format!("{total}% match")),
    };

    let metadata = &result.metadata;
    let page = metadata.display_page();
    ResultEntryView {
        rank,
        score,
        year: metadata.year.to_string(),
        paper: metadata.paper.to_string(),
        question_number: metadata.question_number,
        page,
        question_text: format_question(&result.question),
        jump_label: format!("Jump to Question (Page {page})"),
        jump: UiAction::OpenPdfWithQuestion {
            year: metadata.year.clone(),
            paper: metadata.paper.clone(),
            page,
            question_number: metadata.question_number,
        },
        view_marking_scheme: UiAction::OpenMarkingScheme {
            year: metadata.year.clone(),
            question_number: Some(metadata.question_number),
        },
    }
}

pub fn render_papers(papers: &PaperBrowser) -> PapersView {
    match papers {
        PaperBrowser::Loading => PapersView::Loading,
        PaperBrowser::Failed(message) => PapersView::Failed(message.clone()),
        PaperBrowser::Loaded(groups) if groups.is_empty() => PapersView::Empty(NO_PAPERS),
        PaperBrowser::Loaded(groups) => PapersView::Grid(groups.iter().map(render_year_card).collect()),
    }
}

fn render_year_card(group: &YearGroup) -> YearCardView {
    YearCardView {
        year: group.year.to_string(),
        papers: group
            .papers
            .iter()
            .map(|entry| PaperLinkView {
                label: format!("Paper {}", entry.paper),
                action: UiAction::OpenPdf {
                    year: group.year.clone(),
                    paper: entry.paper.clone(),
                    page: None,
                },
            })
            .collect(),
        marking_scheme: group.has_marking_scheme.then(|| PaperLinkView {
            label: "Marking Scheme".to_string(),
            action: UiAction::OpenMarkingScheme {
                year: group.year.clone(),
                question_number: None,
            },
        }),
    }
}

fn render_modal(controller: &ViewController) -> Option<ModalView> {
    let modal = controller.modal();
    if !modal.is_open() {
        return None;
    }
    Some(ModalView {
        title: modal.title().to_string(),
        subtitle: modal.subtitle().to_string(),
        subtitle_loading: modal.is_subtitle_loading(),
        viewer: modal.viewer().cloned(),
        show_view_marking_scheme: modal.shows_view_marking_scheme(),
        show_back_to_question: modal.shows_back_to_question(),
    })
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
