use super::*;
use client_core::{
    controller::{papers::PaperBrowser, search::SearchOutcome},
    view::{render_papers, render_results},
};
use shared::{
    domain::{PaperNumber, Year},
    protocol::{PaperEntry, QuestionMetadata, SearchResponse, SearchResult, YearGroup},
};

fn response() -> SearchResponse {
    SearchResponse {
        query: "matrices".to_string(),
        total_found: 1,
        results: vec![SearchResult {
            similarity_score: 0.6543,
            semantic_score: Some(0.5),
            keyword_score: Some(0.81),
            metadata: QuestionMetadata {
                year: Year::from("2018"),
                paper: PaperNumber::from("2"),
                question_number: 7,
                page_number: None,
                filename: None,
            },
            question: "Find the inverse.\n\n\n\nShow your working.".to_string(),
        }],
    }
}

#[test]
fn results_list_matches_gui_labels() {
    let outcome = SearchOutcome::Results(response());
    let text = format_results(&render_results(Some(&outcome), false));
    assert_eq!(
        text,
        "Found 1 results for \"matrices\"\n\
         \n\
         #1 2018 - Paper 2 - Question 7 (Page 1) [65.4% match]\n    \
         Find the inverse.\n    \n    \
         Show your working.\n"
    );
}

#[test]
fn debug_results_show_sub_scores() {
    let outcome = SearchOutcome::Results(response());
    let text = format_results(&render_results(Some(&outcome), true));
    assert!(text.contains("[65.4% total (Semantic: 50.0%, Keyword: 81.0%)]"));
}

#[test]
fn failed_search_prints_error_header() {
    let outcome = SearchOutcome::Failed("Network error occurred".to_string());
    assert_eq!(
        format_results(&render_results(Some(&outcome), false)),
        "Search Error: Network error occurred\n"
    );
}

#[test]
fn papers_list_one_line_per_year() {
    let papers = PaperBrowser::Loaded(vec![
        YearGroup {
            year: Year::from("2020"),
            papers: vec![
                PaperEntry {
                    paper: PaperNumber::from("1"),
                    filename: None,
                },
                PaperEntry {
                    paper: PaperNumber::from("2"),
                    filename: None,
                },
            ],
            has_marking_scheme: true,
        },
        YearGroup {
            year: Year::from("2019"),
            papers: vec![PaperEntry {
                paper: PaperNumber::from("1"),
                filename: None,
            }],
            has_marking_scheme: false,
        },
    ]);
    assert_eq!(
        format_papers(&render_papers(&papers)),
        "2020: Paper 1, Paper 2, Marking Scheme\n2019: Paper 1\n"
    );
    assert_eq!(
        format_papers(&render_papers(&PaperBrowser::Loaded(Vec::new()))),
        "No papers available\n"
    );
}

#[test]
fn lookup_prefers_found_page_then_backend_message() {
    let found = MarkingSchemeLookup {
        found: true,
        page: Some(12),
        message: None,
        year: None,
        question_number: Some(3),
    };
    assert_eq!(format_lookup(3, &found), "Solution for Question 3 (Page 12)");

    let missing = MarkingSchemeLookup {
        found: false,
        page: Some(1),
        message: Some("Question 9 not found, showing first page".to_string()),
        year: None,
        question_number: None,
    };
    assert_eq!(
        format_lookup(9, &missing),
        "Question 9 not found, showing first page"
    );

    let bare = MarkingSchemeLookup {
        found: false,
        page: None,
        message: None,
        year: None,
        question_number: None,
    };
    assert_eq!(
        format_lookup(2, &bare),
        "Question 2 not found, showing full marking scheme"
    );
}

#[test]
fn status_line_reports_readiness() {
    let status = StatusResponse {
        status: "Loading embeddings".to_string(),
        ready: false,
        is_processing: true,
    };
    assert_eq!(
        format_status(&status),
        "Loading embeddings (not ready) [processing]"
    );
}
