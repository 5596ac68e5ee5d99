use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_QUESTION_CHARS: usize = 800;
pub const TRUNCATION_MARKER: &str = "...";

static BLANK_LINE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("blank line pattern is valid"));

/// Score in `0..=1` as a percentage with one decimal place, without the `%` sign.
/// Ties round away from zero, so 0.8125 shows as `81.3`.
pub fn format_percentage(score: f64) -> String {
    format!("{:.1}", (score * 1000.0).round() / 10.0)
}

/// Question text as shown in a result entry: blank-line runs collapsed to a
/// single blank line, trimmed, and capped at [`MAX_QUESTION_CHARS`] characters.
pub fn format_question(question: &str) -> String {
    let normalized = BLANK_LINE_RUN.replace_all(question, "\n\n");
    let normalized = normalized.trim();
    if normalized.chars().count() <= MAX_QUESTION_CHARS {
        return normalized.to_string();
    }
    let mut truncated: String = normalized.chars().take(MAX_QUESTION_CHARS).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}
