//! Helpers for reading ASF's `{Success, Message, Result}` response envelope

use serde_json::Value;

/// `Success` flag, if the body carries one. Lowercase keys are accepted too.
pub fn success_flag(response: &Value) -> Option<bool> {
    response
        .get("Success")
        .or_else(|| response.get("success"))
        .and_then(Value::as_bool)
}

pub fn has_success_indicator(response: &Value) -> bool {
    response.get("Success").is_some() || response.get("success").is_some()
}

pub fn is_success(response: &Value) -> bool {
    success_flag(response).unwrap_or(false)
}

pub fn message(response: &Value) -> Option<&str> {
    response
        .get("Message")
        .or_else(|| response.get("message"))
        .and_then(Value::as_str)
}

/// Scalar as plain text: strings without quotes, everything else as JSON.
pub(crate) fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Loose truthiness: null, false, zero, and empty strings or containers count as empty.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
