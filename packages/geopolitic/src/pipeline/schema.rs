//! Lenient field readers for model responses.
//!
//! Models return roughly the shape we ask for. These helpers read a field
//! when it has the expected JSON type and fall back to "absent" otherwise,
//! so one bad entry is dropped instead of failing the whole response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{CollaboratorError, PipelineError, Result};

/// Decode a model reply that must be a JSON object.
pub(crate) fn decode_object<T: DeserializeOwned>(payload: Value) -> Result<T> {
    let object: Map<String, Value> = serde_json::from_value(payload).map_err(malformed)?;
    serde_json::from_value(Value::Object(object)).map_err(malformed)
}

fn malformed(source: serde_json::Error) -> PipelineError {
    CollaboratorError::MalformedResponse {
        service: "llm",
        source,
    }
    .into()
}

/// A string field; any other JSON type reads as `None`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// An array of strings; non-string entries are skipped and a non-array is empty.
pub(crate) fn string_entries<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// An array of raw entries; a non-array is empty.
pub(crate) fn raw_entries<'de, D>(deserializer: D) -> std::result::Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    })
}

/// Trimmed, non-empty text.
pub(crate) fn non_empty(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
