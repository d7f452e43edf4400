use regex::Regex;
use std::sync::OnceLock;

use crate::sentences::split_sentences;

/// Boilerplate copied in by ticketing and chat tools
const BOILERPLATE_PHRASES: &[&str] = &[
    "(Work notes (internal))",
    "Ms-Team Chat--------------------------",
    "Sent from my iPhone",
];

static EMAIL_HEADER: OnceLock<Regex> = OnceLock::new();

/// Prepare a work note chunk for prompting
///
/// Forwarded e-mail headers between `From:` and `Subject:` are dropped, the
/// text is split into sentences, boilerplate is removed and the remaining
/// sentences are joined one per line.
pub fn prepare_worknote(worknote: &str) -> String {
    let re = EMAIL_HEADER
        .get_or_init(|| Regex::new(r"(?is)From:.*?Subject:").expect("valid header regex"));
    let without_headers = re.replace_all(worknote, "Subject:");

    split_sentences(&without_headers)
        .into_iter()
        .map(|sentence| strip_boilerplate(&sentence))
        .filter(|sentence| !sentence.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_boilerplate(sentence: &str) -> String {
    let mut sentence = sentence.to_string();
    for phrase in BOILERPLATE_PHRASES {
        sentence = sentence.replace(phrase, "");
    }
    sentence.trim().to_string()
}
