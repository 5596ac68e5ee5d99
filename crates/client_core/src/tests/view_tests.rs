use super::*;
use crate::{
    config::ClientSettings,
    controller::search::SearchOutcome,
    format::{MAX_QUESTION_CHARS, TRUNCATION_MARKER},
    ApiClientError,
};
use shared::{
    domain::{PaperNumber, Year},
    protocol::{PaperEntry, QuestionMetadata, StatusResponse},
};

fn result(score: f64, semantic: Option<f64>, keyword: Option<f64>, question: &str) -> SearchResult {
    SearchResult {
        similarity_score: score,
        semantic_score: semantic,
        keyword_score: keyword,
        metadata: QuestionMetadata {
            year: Year::from("2019"),
            paper: PaperNumber::from("1"),
            question_number: 5,
            page_number: Some(9),
            filename: Some("2019-paper1.pdf".to_string()),
        },
        question: question.to_string(),
    }
}

fn response(results: Vec<SearchResult>) -> SearchResponse {
    SearchResponse {
        query: "differentiation".to_string(),
        total_found: results.len() as u64,
        results,
    }
}

#[test]
fn n_results_render_n_entries_with_one_decimal_percentages() {
    let outcome = SearchOutcome::Results(response(vec![
        result(0.91234, None, None, "a"),
        result(0.5, None, None, "b"),
        result(0.07777, None, None, "c"),
    ]));

    let ResultsView::List { header, entries } = render_results(Some(&outcome), false) else {
        panic!("expected a result list");
    };
    assert_eq!(header, "Found 3 results for \"differentiation\"");
    assert_eq!(entries.len(), 3);
    let labels: Vec<_> = entries
        .iter()
        .map(|entry| match &entry.score {
            ScoreView::Total(label) => label.clone(),
            other => panic!("unexpected score view {other:?}"),
        })
        .collect();
    assert_eq!(labels, vec!["91.2% match", "50.0% match", "7.8% match"]);
    assert_eq!(
        entries.iter().map(|entry| entry.rank).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn debug_mode_reveals_both_sub_scores() {
    let entry = render_result_entry(&result(0.8, Some(0.75), Some(0.9), "q"), 1, true);
    assert_eq!(
        entry.score,
        ScoreView::Breakdown {
            total: "80.0% total".to_string(),
            semantic: "Semantic: 75.0%".to_string(),
            keyword: "Keyword: 90.0%".to_string(),
        }
    );
}

#[test]
fn without_debug_only_total_is_shown() {
    let entry = render_result_entry(&result(0.8, Some(0.75), Some(0.9), "q"), 1, false);
    assert_eq!(entry.score, ScoreView::Total("80.0% match".to_string()));
}

#[test]
fn debug_mode_needs_both_sub_scores() {
    let entry = render_result_entry(&result(0.8, Some(0.75), None, "q"), 1, true);
    assert_eq!(entry.score, ScoreView::Total("80.0% match".to_string()));
}

#[test]
fn entry_actions_target_question_page_and_marking_scheme() {
    let entry = render_result_entry(&result(0.8, None, None, "q"), 1, false);
    assert_eq!(entry.jump_label, "Jump to Question (Page 9)");
    assert_eq!(
        entry.jump,
        UiAction::OpenPdfWithQuestion {
            year: Year::from("2019"),
            paper: PaperNumber::from("1"),
            page: 9,
            question_number: 5,
        }
    );
    assert_eq!(
        entry.view_marking_scheme,
        UiAction::OpenMarkingScheme {
            year: Year::from("2019"),
            question_number: Some(5),
        }
    );
}

#[test]
fn missing_page_number_falls_back_to_first_page() {
    let mut raw = result(0.8, None, None, "q");
    raw.metadata.page_number = None;
    let entry = render_result_entry(&raw, 1, false);
    assert_eq!(entry.page, 1);
    assert_eq!(entry.jump_label, "Jump to Question (Page 1)");
}

#[test]
fn long_question_text_is_truncated() {
    let long = "w".repeat(MAX_QUESTION_CHARS + 50);
    let entry = render_result_entry(&result(0.8, None, None, &long), 1, false);
    assert_eq!(
        entry.question_text.chars().count(),
        MAX_QUESTION_CHARS + TRUNCATION_MARKER.len()
    );
}

#[test]
fn empty_result_set_renders_placeholder() {
    let outcome = SearchOutcome::Results(response(Vec::new()));
    assert_eq!(
        render_results(Some(&outcome), false),
        ResultsView::Empty {
            header: "Found 0 results for \"differentiation\"".to_string(),
            message: NO_RESULTS,
        }
    );
}

#[test]
fn failed_search_renders_error_banner() {
    let outcome = SearchOutcome::Failed("Query is required".to_string());
    assert_eq!(
        render_results(Some(&outcome), true),
        ResultsView::Error {
            header: SEARCH_ERROR_HEADER.to_string(),
            message: "Query is required".to_string(),
        }
    );
    assert_eq!(render_results(None, false), ResultsView::Hidden);
}

#[test]
fn year_cards_list_papers_and_optional_marking_scheme() {
    let groups = vec![
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
    ];

    let PapersView::Grid(cards) = render_papers(&PaperBrowser::Loaded(groups)) else {
        panic!("expected a grid");
    };
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].year, "2020");
    assert_eq!(
        cards[0]
            .papers
            .iter()
            .map(|link| link.label.as_str())
            .collect::<Vec<_>>(),
        vec!["Paper 1", "Paper 2"]
    );
    assert_eq!(
        cards[0].marking_scheme.as_ref().map(|link| &link.action),
        Some(&UiAction::OpenMarkingScheme {
            year: Year::from("2020"),
            question_number: None,
        })
    );
    assert!(cards[1].marking_scheme.is_none());
    assert_eq!(
        cards[1].papers[0].action,
        UiAction::OpenPdf {
            year: Year::from("2019"),
            paper: PaperNumber::from("1"),
            page: None,
        }
    );
}

#[test]
fn papers_placeholders() {
    assert_eq!(render_papers(&PaperBrowser::Loading), PapersView::Loading);
    assert_eq!(
        render_papers(&PaperBrowser::Loaded(Vec::new())),
        PapersView::Empty(NO_PAPERS)
    );
    assert_eq!(
        render_papers(&PaperBrowser::Failed("Failed to load papers".to_string())),
        PapersView::Failed("Failed to load papers".to_string())
    );
}

#[test]
fn toggling_debug_rerenders_last_results() {
    let mut controller = ViewController::new(&ClientSettings::default());
    controller.apply_status(Ok(StatusResponse {
        status: "Ready".to_string(),
        ready: true,
        is_processing: false,
    }));
    controller.search_mut().set_query_input("differentiation");
    controller.dispatch(UiAction::SubmitSearch);
    controller.apply_search(Ok(response(vec![result(0.6, Some(0.5), Some(0.7), "q")])));

    let ResultsView::List { entries, .. } = controller.render().results else {
        panic!("expected results");
    };
    assert!(matches!(entries[0].score, ScoreView::Total(_)));

    controller.dispatch(UiAction::ToggleDebug);
    let view = controller.render();
    assert!(view.debug_mode);
    let ResultsView::List { entries, .. } = view.results else {
        panic!("expected results");
    };
    assert!(matches!(entries[0].score, ScoreView::Breakdown { .. }));
}

#[test]
fn app_view_reflects_modal_and_search_lock() {
    let mut controller = ViewController::new(&ClientSettings::default());
    let view = controller.render();
    assert!(!view.search.enabled);
    assert!(view.modal.is_none());
    assert_eq!(view.papers, PapersView::Loading);
    assert_eq!(view.search.result_count_options, &[5, 10, 15, 20]);

    controller.apply_papers(Err(ApiClientError::Status {
        endpoint: "/api/papers".to_string(),
        status: 500,
        message: None,
    }));
    controller.dispatch(UiAction::OpenPdfWithQuestion {
        year: Year::from("2015"),
        paper: PaperNumber::from("2"),
        page: 3,
        question_number: 7,
    });
    let view = controller.render();
    assert_eq!(view.papers, PapersView::Failed("Failed to load papers".to_string()));
    let modal = view.modal.expect("modal open");
    assert_eq!(modal.title, "2015 - Paper 2");
    assert_eq!(modal.subtitle, "Question 7 (Page 3)");
    assert!(modal.show_view_marking_scheme);
    assert!(!modal.show_back_to_question);
    assert_eq!(
        modal.viewer,
        Some(PdfTarget::paper(Year::from("2015"), PaperNumber::from("2"), Some(3)))
    );
}
