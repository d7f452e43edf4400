use notewise_common::{NotewiseError, Result};

/// Approximate characters per token for English operational text
const CHARS_PER_TOKEN: usize = 4;

/// Largest input accepted in one request
pub const MAX_INPUT_TOKENS: usize = 35_000;

/// Chunk size used when preparing prompts
const PROMPT_CHUNK_TOKENS: usize = 4_000;

/// Text chunk
#[derive(Debug, Clone)]
pub struct TextChunk {
    /// Chunk text
    pub text: String,

    /// Start byte index in original text
    pub start: usize,

    /// End byte index in original text
    pub end: usize,
}

/// Approximate token count
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Check the input limit and split text into prompt-sized chunks
pub fn chunk_for_prompts(text: &str) -> Result<Vec<String>> {
    let tokens = estimate_tokens(text);
    if tokens > MAX_INPUT_TOKENS {
        return Err(NotewiseError::invalid_input(format!(
            "Cannot process more than {} tokens at one go! Tokens:{}",
            MAX_INPUT_TOKENS, tokens
        )));
    }

    Ok(chunk_text(text, PROMPT_CHUNK_TOKENS, 0)
        .into_iter()
        .map(|chunk| chunk.text)
        .collect())
}

/// Split text into chunks by token count (approximate)
pub fn chunk_text(text: &str, max_tokens: usize, overlap: usize) -> Vec<TextChunk> {
    let max_chars = (max_tokens * CHARS_PER_TOKEN).max(1);
    let overlap_chars = overlap * CHARS_PER_TOKEN;
    let text_len = text.len();

    if text_len <= max_chars {
        return vec![TextChunk {
            text: text.to_string(),
            start: 0,
            end: text_len,
        }];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text_len {
        let mut end = floor_char_boundary(text, (start + max_chars).min(text_len));
        if end <= start {
            // A single multi-byte char wider than the window
            end = ceil_char_boundary(text, start + 1);
        }

        // Try to find a good breaking point (sentence boundary)
        let actual_end = if end < text_len {
            find_break_point(text, start, end)
        } else {
            end
        };

        chunks.push(TextChunk {
            text: text[start..actual_end].to_string(),
            start,
            end: actual_end,
        });

        if actual_end >= text_len {
            break;
        }

        // Next chunk overlaps the previous one but always moves forward
        let next = floor_char_boundary(text, actual_end.saturating_sub(overlap_chars));
        start = if next > start { next } else { actual_end };
    }

    chunks
}

/// Find a good breaking point (sentence boundary)
fn find_break_point(text: &str, start: usize, ideal_end: usize) -> usize {
    // Look for sentence endings within the last 20% of the chunk
    let search_start = ceil_char_boundary(text, start + ((ideal_end - start) * 80 / 100));
    if search_start >= ideal_end {
        return ideal_end;
    }
    let search_text = &text[search_start..ideal_end];

    let sentence_endings = [". ", ".\n", "! ", "!\n", "? ", "?\n", "\n\n"];

    sentence_endings
        .iter()
        .filter_map(|ending| search_text.rfind(ending).map(|idx| idx + ending.len()))
        .max()
        .map(|offset| search_start + offset)
        .unwrap_or(ideal_end)
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}
