//! Coerce free-form model output into a fixed-shape record

use notewise_common::{NotewiseError, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::records::RecordShape;

static JSON_BLOCK: OnceLock<Regex> = OnceLock::new();

/// First `{ ... }` span in the text
///
/// Runs from the first `{` to the first `}` after it. Braces are not
/// balanced, so a reply with nested objects is cut at the first inner `}`.
pub fn extract_json_block(raw: &str) -> Option<&str> {
    let re = JSON_BLOCK.get_or_init(|| Regex::new(r"(?s)\{(.+?)\}").expect("valid JSON block regex"));
    re.find(raw).map(|m| m.as_str())
}

/// Map the JSON object embedded in `raw` onto record `R`
///
/// Keys match fields case-insensitively with spaces read as underscores.
/// Unknown keys are dropped and missing fields stay empty. A record with no
/// non-empty field is a generation failure.
pub fn structure<R: RecordShape>(raw: &str) -> Result<R> {
    let block = extract_json_block(raw)
        .ok_or_else(|| NotewiseError::parse("no JSON object found in model output"))?;

    let parsed: Value = serde_json::from_str(block)
        .map_err(|e| NotewiseError::parse(format!("invalid JSON in model output: {}", e)))?;
    let object = parsed
        .as_object()
        .ok_or_else(|| NotewiseError::parse("model output JSON is not an object"))?;

    let schema = R::schema();
    let mut record = R::default();

    for (key, value) in object {
        let normalized = normalize_key(key);
        let Some(index) = schema.index_of(&normalized) else {
            debug!("Ignoring unknown key in model output: {}", key);
            continue;
        };
        if let (Some(slot), Some(text)) = (record.slot_mut(index), value_to_text(value)) {
            *slot = text;
        }
    }

    if record.is_empty() {
        warn!("Model output carried no usable fields: {}", block);
        return Err(NotewiseError::generation(
            "The model failed to generate a valid response.",
        ));
    }

    Ok(record)
}

fn normalize_key(key: &str) -> String {
    key.to_lowercase().replace(' ', "_")
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}
