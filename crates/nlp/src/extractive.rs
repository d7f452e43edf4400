//! Local extractive summarizer
//!
//! Scores sentences by the document frequency of their content words and keeps
//! the best ones, in their original order, until the word budget is spent.

use std::collections::HashMap;
use tracing::debug;

use crate::sentences::split_sentences;

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "for", "from", "has",
    "have", "he", "her", "his", "i", "in", "is", "it", "its", "of", "on", "or", "our", "she",
    "so", "that", "the", "their", "them", "there", "they", "this", "to", "was", "we", "were",
    "will", "with", "you", "your",
];

/// Default word budget for a short summary
pub const DEFAULT_MAX_WORDS: usize = 150;

/// Frequency based sentence extractor
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    max_words: usize,
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WORDS)
    }
}

impl ExtractiveSummarizer {
    /// Create summarizer with a word budget (at least one sentence is always kept)
    pub fn new(max_words: usize) -> Self {
        Self { max_words }
    }

    /// Summarize a work note
    pub fn summarize(&self, text: &str) -> String {
        let sentences: Vec<String> = split_sentences(text)
            .iter()
            .map(|s| strip_punctuation_tokens(s))
            .filter(|s| !s.is_empty())
            .collect();

        if sentences.is_empty() {
            return String::new();
        }

        let frequencies = word_frequencies(&sentences);

        let mut ranked: Vec<(usize, f64)> = sentences
            .iter()
            .enumerate()
            .map(|(i, s)| (i, sentence_score(s, &frequencies)))
            .collect();
        // Highest score first, earlier sentence wins ties
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut selected = Vec::new();
        let mut words_used = 0;
        for (index, _) in ranked {
            let words = sentences[index].split_whitespace().count();
            if !selected.is_empty() && words_used + words > self.max_words {
                continue;
            }
            selected.push(index);
            words_used += words;
        }
        selected.sort_unstable();

        debug!(
            "Extractive summary kept {}/{} sentences ({} words)",
            selected.len(),
            sentences.len(),
            words_used
        );

        selected
            .into_iter()
            .map(|i| sentences[i].as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Drop tokens made only of punctuation
fn strip_punctuation_tokens(sentence: &str) -> String {
    sentence
        .split_whitespace()
        .filter(|token| token.chars().any(|c| c.is_alphanumeric()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn content_words(sentence: &str) -> impl Iterator<Item = String> + '_ {
    sentence
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(&w.as_str()))
}

fn word_frequencies(sentences: &[String]) -> HashMap<String, usize> {
    let mut frequencies = HashMap::new();
    for sentence in sentences {
        for word in content_words(sentence) {
            *frequencies.entry(word).or_insert(0) += 1;
        }
    }
    frequencies
}

/// Mean frequency of a sentence's content words
fn sentence_score(sentence: &str, frequencies: &HashMap<String, usize>) -> f64 {
    let (total, count) = content_words(sentence).fold((0usize, 0usize), |(total, count), w| {
        (total + frequencies.get(&w).copied().unwrap_or(0), count + 1)
    });
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(ExtractiveSummarizer::default().summarize("  "), "");
    }

    #[test]
    fn test_keeps_order_and_budget() {
        let text = "Database latency spiked. The database primary was overloaded. \
                    Lunch was ordered. Database primary failed over to replica.";
        let summary = ExtractiveSummarizer::new(8).summarize(text);
        assert_eq!(
            summary,
            "Database latency spiked. The database primary was overloaded."
        );
    }

    #[test]
    fn test_single_long_sentence_is_kept() {
        let text = "one two three four five six";
        assert_eq!(ExtractiveSummarizer::new(2).summarize(text), text);
    }

    #[test]
    fn test_punctuation_tokens_removed() {
        let summary = ExtractiveSummarizer::default().summarize("Restarted -- the cache !!");
        assert_eq!(summary, "Restarted the cache");
    }
}
