//! Best-effort JSON decoding for opaque strings handed to us by external systems.
//!
//! # Responsibilities
//! - Decode ledger `logs` / `payload` strings without ever failing the caller
//! - Provide JavaScript-style truthiness for loosely typed wallet and ledger fields

use serde_json::{Map, Value};

/// Decode `input` as JSON.
pub fn parse_json(input: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(input)
}

/// Decode `input` as JSON, falling back to an empty object on any decode failure.
pub fn parse_json_or_empty(input: &str) -> Value {
    parse_json(input).unwrap_or_else(|e| {
        tracing::trace!(error = %e, "Tolerating malformed JSON");
        Value::Object(Map::new())
    })
}

/// Truthiness of a JSON value as the wallet and ledger producers interpret it.
///
/// `null`, `false`, `0`, `NaN` and `""` are falsy. Arrays and objects are truthy even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Truthiness of `object[key]`, treating a missing key or a non-object as falsy.
pub fn field_is_truthy(object: &Value, key: &str) -> bool {
    object.get(key).map(is_truthy).unwrap_or(false)
}
