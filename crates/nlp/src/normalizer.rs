use notewise_common::{NotewiseError, Result};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::classifier::LineClassifier;

/// Generic information stripped from each line, applied in order
const GENERIC_INFO_PATTERNS: &[&str] = &[
    // 2024-01-01 10:00:00
    r"\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}",
    // (1234)
    r"\(\d+\)",
    // [INFO], [John Doe]
    r"\[.*?\]",
    r"[-*]+",
    // "John Smith," salutations
    r"(\b[A-Z][a-z]*\b\s*)+\s*,",
    // @: jane.doe@example.com, +1-555: ops@example.com
    r"(@|c|\+[\d-]+|\(at\))\s*:\s*[a-zA-Z0-9_.]+@[a-zA-Z0-9_.]+",
];

static GENERIC_INFO: OnceLock<Vec<Regex>> = OnceLock::new();
static WHITESPACE: OnceLock<Regex> = OnceLock::new();

fn generic_info_patterns() -> &'static [Regex] {
    GENERIC_INFO.get_or_init(|| {
        GENERIC_INFO_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("valid generic info pattern"))
            .collect()
    })
}

/// Cleanse a line-oriented work note
///
/// Blank lines are skipped, whitespace is collapsed, timestamps, bracketed tags,
/// separators, salutations and contact details are removed, and lines the
/// classifier reports as chitchat are discarded. Survivors are joined with `\n`.
pub fn normalize(text: &str, classifier: &dyn LineClassifier) -> Result<String> {
    let mut cleaned_lines = Vec::new();

    for line in text.trim().split('\n') {
        if line.trim().is_empty() {
            continue;
        }

        let cleaned = remove_generic_info(&collapse_whitespace(line));
        if cleaned.is_empty() {
            continue;
        }

        let chitchat = classifier.is_chitchat(&cleaned).map_err(|e| {
            NotewiseError::nlp(format!("Error during chitchat removal: {}", e))
        })?;
        if chitchat {
            debug!("Dropping chitchat line: {}", cleaned);
            continue;
        }

        cleaned_lines.push(cleaned);
    }

    Ok(cleaned_lines.join("\n"))
}

/// Trim and reduce whitespace runs to a single space
fn collapse_whitespace(line: &str) -> String {
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"));
    re.replace_all(line.trim(), " ").into_owned()
}

fn remove_generic_info(line: &str) -> String {
    let mut text = line.to_string();
    for re in generic_info_patterns() {
        text = re.replace_all(&text, "").into_owned();
    }
    text.trim().to_string()
}
