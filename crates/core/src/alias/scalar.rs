//! Scalar coercion from raw JSON values to canonical field types.
//!
//! Each function returns `None` when the value cannot be read as the
//! target type; raw objects and arrays never pass through.

use rust_decimal::Decimal;
use serde_json::Value;

/// Strings verbatim; numbers and booleans as their JSON text.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numbers and numeric strings. Exponent notation is accepted.
pub fn decimal(value: &Value) -> Option<Decimal> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    raw.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(&raw).ok())
}

/// Non-negative integers that fit `u32`, as numbers or strings.
pub fn count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Booleans and the strings "true"/"false" in any ASCII case.
pub fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}
