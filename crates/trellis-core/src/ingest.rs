//! Boundary between the unreliable upstream tagging producer and the engine.
//! Everything here downgrades malformed values instead of failing the batch:
//! only a document that is not JSON at all (or not the expected top-level
//! shape) surfaces as an error.

use serde_json::Value;

use crate::error::{Result, TrellisError};
use crate::taxonomy::CandidateInput;

/// Unwraps the assistant text from the common chat-completion response
/// shapes: `message.content`, `choices[0].message.content`, then `response`.
#[must_use]
pub fn extract_payload_text(value: &Value) -> Option<String> {
    if let Some(content) = value
        .get("message")
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
    {
        return Some(content.to_string());
    }
    if let Some(content) = value
        .get("choices")
        .and_then(|choices| choices.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
    {
        return Some(content.to_string());
    }
    if let Some(content) = value.get("response").and_then(|response| response.as_str()) {
        return Some(content.to_string());
    }
    None
}

/// Recovers the first JSON object or array embedded in chatty or fenced
/// model output.
#[must_use]
pub fn extract_json_fragment(text: &str) -> Option<String> {
    let start = text
        .char_indices()
        .find(|(_, c)| *c == '{' || *c == '[')
        .map(|(idx, _)| idx)?;
    let sliced = &text[start..];
    let end = sliced
        .char_indices()
        .rev()
        .find(|(_, c)| *c == '}' || *c == ']')
        .map(|(idx, c)| idx + c.len_utf8())?;
    Some(sliced[..end].to_string())
}

/// Parses a flat candidate document (JSON array) into the normalized
/// candidate union the aggregator consumes. Per entry:
/// - a string becomes a one-label sequence (blank → empty, rejected later);
/// - an array of strings becomes a sequence, blank labels dropped;
/// - anything else (numbers, objects, arrays with non-string elements)
///   becomes `Invalid`, so the aggregator records the rejection at the
///   entry's ordinal index.
pub fn parse_candidates(raw: &str) -> Result<Vec<CandidateInput>> {
    let value = serde_json::from_str::<Value>(raw)
        .map_err(|err| TrellisError::Parse(format!("candidate document is not JSON: {err}")))?;
    let Value::Array(entries) = value else {
        return Err(TrellisError::Parse(
            "candidate document must be a JSON array".to_string(),
        ));
    };
    Ok(entries.iter().map(normalize_candidate).collect())
}

fn normalize_candidate(entry: &Value) -> CandidateInput {
    match entry {
        Value::String(label) => {
            if label.trim().is_empty() {
                CandidateInput::Sequence(Vec::new())
            } else {
                CandidateInput::Sequence(vec![label.clone()])
            }
        }
        Value::Array(elements) => {
            let mut labels = Vec::with_capacity(elements.len());
            for element in elements {
                let Value::String(label) = element else {
                    return CandidateInput::Invalid;
                };
                if !label.trim().is_empty() {
                    labels.push(label.clone());
                }
            }
            CandidateInput::Sequence(labels)
        }
        _ => CandidateInput::Invalid,
    }
}

/// Parses a label-list document that may arrive as either a single string or
/// an array (`Text | List`). Non-string array elements are skipped.
pub fn parse_string_list(raw: &str) -> Result<Vec<String>> {
    let value = serde_json::from_str::<Value>(raw)
        .map_err(|err| TrellisError::Parse(format!("label document is not JSON: {err}")))?;
    match value {
        Value::String(label) => Ok(vec![label]),
        Value::Array(elements) => Ok(elements
            .into_iter()
            .filter_map(|element| match element {
                Value::String(label) => Some(label),
                _ => None,
            })
            .collect()),
        _ => Err(TrellisError::Parse(
            "label document must be a string or an array of strings".to_string(),
        )),
    }
}
