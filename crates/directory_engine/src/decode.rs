use directory_core::{ExperienceRecord, ProfessionalRecord, ResultPage};
use directory_logging::dir_warn;
use serde::Deserialize;
use serde_json::Value;

use crate::ApiError;

const IDENTITY_KEY: &str = "data_member_id";
const MAX_ERROR_MESSAGE_CHARS: usize = 200;

/// Both endpoints wrap their payload as `{ "data": ... }`.
#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
}

fn read_envelope(body: &[u8]) -> Result<Option<Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let envelope: Envelope =
        serde_json::from_slice(body).map_err(|err| ApiError::Decode(err.to_string()))?;
    Ok(envelope.data)
}

/// Decodes a list-endpoint body.
///
/// An object carrying `data_member_id` is an exact lookup hit; an array is a
/// result window; anything else (missing, null, empty, or an object without
/// identity) means no results.
pub fn decode_page(body: &[u8]) -> Result<ResultPage, ApiError> {
    match read_envelope(body)? {
        None | Some(Value::Null) => Ok(ResultPage::Empty),
        Some(Value::Array(items)) if items.is_empty() => Ok(ResultPage::Empty),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(serde_json::from_value::<ProfessionalRecord>)
            .collect::<Result<Vec<_>, _>>()
            .map(ResultPage::Many)
            .map_err(|err| ApiError::Decode(err.to_string())),
        Some(Value::Object(map)) if map.contains_key(IDENTITY_KEY) => {
            serde_json::from_value(Value::Object(map))
                .map(ResultPage::Single)
                .map_err(|err| ApiError::Decode(err.to_string()))
        }
        Some(other) => {
            dir_warn!("list response carried no records: {}", other);
            Ok(ResultPage::Empty)
        }
    }
}

/// Decodes an experiences-endpoint body. Missing or null `data` is an empty list.
pub fn decode_experiences(body: &[u8]) -> Result<Vec<ExperienceRecord>, ApiError> {
    match read_envelope(body)? {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(serde_json::from_value::<ExperienceRecord>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| ApiError::Decode(err.to_string())),
        Some(other) => Err(ApiError::Decode(format!(
            "expected a list of experiences, got {}",
            json_kind(&other)
        ))),
    }
}

/// Best-effort extraction of the server's error payload from a non-2xx body.
///
/// Looks at `error`, `message` and `detail` (also one level down inside
/// `error`), then falls back to the raw text.
pub fn error_message(body: &[u8]) -> Option<String> {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Some(message) = message_field(&value) {
            return Some(truncate(message.trim()));
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(truncate(text))
    }
}

fn message_field(value: &Value) -> Option<&str> {
    for key in ["error", "message", "detail"] {
        match value.get(key) {
            Some(Value::String(text)) if !text.trim().is_empty() => return Some(text.as_str()),
            Some(nested @ Value::Object(_)) => {
                if let Some(text) = nested.get("message").and_then(Value::as_str) {
                    return Some(text);
                }
            }
            _ => {}
        }
    }
    None
}

fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_ERROR_MESSAGE_CHARS {
        text.chars().take(MAX_ERROR_MESSAGE_CHARS).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
