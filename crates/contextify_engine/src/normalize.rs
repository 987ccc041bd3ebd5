//! Maps whatever the conversion service sent back onto [`ConversionResult`].
//!
//! Failure is decided in this order: non-2xx status, an `error` field, a
//! `detail` field. The message prefers `error`, then `detail`, then
//! `message`, then a generic `Request failed (status)`. Older deployments
//! answer `200` with an `error` field; newer ones use real status codes.
//! Both shapes classify the same way.
use serde_json::{Map, Value};

use crate::ConversionResult;

/// Parses a response body as JSON, wrapping anything else as `{"raw": text}`.
pub fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| {
        let mut wrapped = Map::new();
        wrapped.insert("raw".to_string(), Value::String(body.to_string()));
        Value::Object(wrapped)
    })
}

pub fn normalize(status: u16, body: &str) -> ConversionResult {
    normalize_value(status, &parse_body(body))
}

pub fn normalize_value(status: u16, body: &Value) -> ConversionResult {
    let error = text_field(body, "error");
    let detail = text_field(body, "detail");
    let failed = !(200..300).contains(&status) || error.is_some() || detail.is_some();

    if failed {
        let message = error
            .or(detail)
            .or_else(|| text_field(body, "message"))
            .unwrap_or_else(|| format!("Request failed ({status})"));
        return ConversionResult::Failure { message };
    }

    let context = body
        .get("context")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let token_estimate = body.get("token_estimate").and_then(token_count);
    ConversionResult::Success {
        context,
        token_estimate,
    }
}

/// Reads a message-like field. Falsy values (absent, `null`, `false`, zero
/// and empty strings) count as missing.
fn text_field(body: &Value, key: &str) -> Option<String> {
    let text = match body.get(key)? {
        Value::Null | Value::Bool(false) => return None,
        Value::Number(n) if n.as_f64() == Some(0.0) => return None,
        Value::String(text) => text.clone(),
        Value::Array(items) => validation_messages(items),
        other => other.to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Validation errors arrive as `[{"loc": [...], "msg": "...", ...}]`;
/// join the `msg` parts, falling back to the raw JSON.
fn validation_messages(items: &[Value]) -> String {
    let messages: Vec<&str> = items
        .iter()
        .filter_map(|item| item.get("msg").and_then(Value::as_str))
        .collect();
    if messages.is_empty() {
        Value::Array(items.to_vec()).to_string()
    } else {
        messages.join("; ")
    }
}

fn token_count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n.round() as u64)
    })
}
