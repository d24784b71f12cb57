//! Error types for the normalization engine.
//!
//! A missing field is never an error: it normalizes to `None`. The
//! types here cover payloads that cannot be traversed at all, bad alias
//! configuration, and unusable date ranges.

use serde_json::Value;

/// The raw payload's root (or a required traversal point) has the wrong
/// JSON kind for the operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("malformed envelope: expected {expected}, found {found}")]
    MalformedEnvelope {
        expected: &'static str,
        found: &'static str,
    },
}

impl NormalizeError {
    pub(crate) fn malformed(expected: &'static str, value: &Value) -> Self {
        NormalizeError::MalformedEnvelope {
            expected,
            found: json_kind(value),
        }
    }
}

/// Invalid alias-table configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AliasError {
    #[error("unknown canonical field: '{0}'")]
    UnknownField(String),

    #[error("field '{field}' has no alias candidates")]
    EmptyCandidates { field: String },

    #[error("invalid alias path '{path}' for field '{field}'")]
    InvalidPath { field: String, path: String },
}

/// A calendar range that cannot be turned into upstream timestamps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("range start {from} is after range end {to}")]
    Inverted { from: String, to: String },
}

/// Human-readable JSON kind name, used in diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
