use regex::Regex;
use std::sync::OnceLock;

static SENTENCE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Split text into trimmed, non-empty sentences
///
/// Line breaks always end a sentence. Within a line, a sentence ends at
/// `.`, `!` or `?` followed by whitespace or the end of the line.
pub fn split_sentences(text: &str) -> Vec<String> {
    let re = SENTENCE_REGEX
        .get_or_init(|| Regex::new(r"(.*?[.!?](?:\s+|$)|.+$)").expect("valid sentence regex"));

    let mut sentences = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        for mat in re.find_iter(line) {
            let sentence = mat.as_str().trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
        }
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("Server down. Restarted it! Is it fine?\nYes");
        assert_eq!(
            sentences,
            vec!["Server down.", "Restarted it!", "Is it fine?", "Yes"]
        );
    }

    #[test]
    fn test_split_keeps_decimals_together() {
        let sentences = split_sentences("Upgraded to 2.4.1 today. Done.");
        assert_eq!(sentences, vec!["Upgraded to 2.4.1 today.", "Done."]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_sentences("  \n\n ").is_empty());
    }
}
