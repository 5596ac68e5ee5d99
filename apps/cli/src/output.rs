//! Plain-text rendering of the same views the desktop shell draws.

use std::fmt::Write as _;

use client_core::view::{PapersView, ResultsView, ScoreView};
use shared::protocol::{MarkingSchemeLookup, StatusResponse};

pub fn format_status(status: &StatusResponse) -> String {
    let readiness = if status.ready { "ready" } else { "not ready" };
    let mut line = format!("{} ({readiness})", status.status);
    if status.is_processing {
        line.push_str(" [processing]");
    }
    line
}

pub fn format_results(results: &ResultsView) -> String {
    let mut out = String::new();
    match results {
        ResultsView::Hidden => {}
        ResultsView::Error { header, message } => {
            let _ = writeln!(out, "{header}: {message}");
        }
        ResultsView::Empty { header, message } => {
            let _ = writeln!(out, "{header}");
            let _ = writeln!(out, "{message}");
        }
        ResultsView::List { header, entries } => {
            let _ = writeln!(out, "{header}");
            for entry in entries {
                let score = match &entry.score {
                    ScoreView::Total(label) => label.clone(),
                    ScoreView::Breakdown {
                        total,
                        semantic,
                        keyword,
                    } => format!("{total} ({semantic}, {keyword})"),
                };
                let _ = writeln!(out);
                let _ = writeln!(
                    out,
                    "#{} {} - Paper {} - Question {} (Page {}) [{score}]",
                    entry.rank, entry.year, entry.paper, entry.question_number, entry.page
                );
                for line in entry.question_text.lines() {
                    let _ = writeln!(out, "    {line}");
                }
            }
        }
    }
    out
}

pub fn format_papers(papers: &PapersView) -> String {
    let mut out = String::new();
    match papers {
        PapersView::Loading => {}
        PapersView::Failed(message) => {
            let _ = writeln!(out, "{message}");
        }
        PapersView::Empty(message) => {
            let _ = writeln!(out, "{message}");
        }
        PapersView::Grid(cards) => {
            for card in cards {
                let labels: Vec<&str> = card.papers.iter().map(|link| link.label.as_str()).collect();
                let scheme = if card.marking_scheme.is_some() {
                    ", Marking Scheme"
                } else {
                    ""
                };
                let _ = writeln!(out, "{}: {}{scheme}", card.year, labels.join(", "));
            }
        }
    }
    out
}

pub fn format_lookup(question_number: u32, lookup: &MarkingSchemeLookup) -> String {
    match (lookup.found, lookup.page) {
        (true, Some(page)) => format!("Solution for Question {question_number} (Page {page})"),
        _ => lookup.message.clone().unwrap_or_else(|| {
            format!("Question {question_number} not found, showing full marking scheme")
        }),
    }
}

#[cfg(test)]
#[path = "tests/output_tests.rs"]
mod tests;
