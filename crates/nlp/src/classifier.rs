use notewise_common::Result;
use tracing::debug;

/// Decides whether a cleaned work note line is conversational filler
pub trait LineClassifier: Send + Sync {
    /// `true` when the line carries no operational content
    fn is_chitchat(&self, line: &str) -> Result<bool>;
}

/// Classifier that keeps every line
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl LineClassifier for AcceptAll {
    fn is_chitchat(&self, _line: &str) -> Result<bool> {
        Ok(false)
    }
}

/// Whole-line phrases that never carry incident content
const CHITCHAT_PHRASES: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "hi all",
    "hi team",
    "hello team",
    "hello all",
    "good morning",
    "good afternoon",
    "good evening",
    "thanks",
    "thank you",
    "thanks a lot",
    "thank you so much",
    "many thanks",
    "thx",
    "ok",
    "okay",
    "ok thanks",
    "ok thank you",
    "sure",
    "noted",
    "got it",
    "cool",
    "great",
    "np",
    "no problem",
    "welcome",
    "you're welcome",
    "bye",
    "see you",
    "have a nice day",
    "have a good day",
    "regards",
    "best regards",
    "kind regards",
    "cheers",
];

/// Filler tokens ignored when judging whether a line only holds pleasantries
const FILLER_WORDS: &[&str] = &[
    "hi", "hello", "hey", "thanks", "thank", "you", "ok", "okay", "sure", "all", "team",
    "please", "pls", "so", "much", "a", "lot", "again", "guys", "folks", "yes", "yeah", "yep",
    "no", "np", "great", "cool", "good", "morning", "noted", "welcome", "bye", "cheers",
];

/// Phrase-list chitchat detector
///
/// A line is chitchat when, ignoring case and punctuation, it is one of the
/// known pleasantries or consists only of filler words.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChitchatFilter;

impl ChitchatFilter {
    pub fn new() -> Self {
        Self
    }
}

impl LineClassifier for ChitchatFilter {
    fn is_chitchat(&self, line: &str) -> Result<bool> {
        let simplified: String = line
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '\'' || c.is_whitespace() {
                    c.to_ascii_lowercase()
                } else {
                    ' '
                }
            })
            .collect();
        let words: Vec<&str> = simplified.split_whitespace().collect();

        if words.is_empty() {
            debug!("Discarding punctuation-only line: {}", line);
            return Ok(true);
        }

        let joined = words.join(" ");
        if CHITCHAT_PHRASES.contains(&joined.as_str()) {
            debug!("Discarding chitchat phrase: {}", line);
            return Ok(true);
        }

        if words.iter().all(|w| FILLER_WORDS.contains(w)) {
            debug!("Discarding filler-only line: {}", line);
            return Ok(true);
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_all() {
        assert!(!AcceptAll.is_chitchat("thanks").unwrap());
    }

    #[test]
    fn test_chitchat_phrases() {
        let filter = ChitchatFilter::new();
        assert!(filter.is_chitchat("Thanks!").unwrap());
        assert!(filter.is_chitchat("Good morning,").unwrap());
        assert!(filter.is_chitchat("ok   thank you").unwrap());
        assert!(filter.is_chitchat("...").unwrap());
    }

    #[test]
    fn test_substantive_lines_kept() {
        let filter = ChitchatFilter::new();
        assert!(!filter.is_chitchat("Restarted the payment service on node 3").unwrap());
        assert!(!filter.is_chitchat("Thanks, the DB failover fixed it").unwrap());
    }
}
