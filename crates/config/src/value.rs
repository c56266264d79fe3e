//! Best-effort coercion of dynamic configuration values into fixed types.
//!
//! Responsibilities:
//! - Convert a parsed JSON value into string, integer, float, boolean,
//!   string-list and string-map forms.
//! - Decide whether a value equals the zero value of its own kind.
//!
//! Does NOT handle:
//! - Key lookup or environment fallback (see `store`).
//! - Parsing whole configuration documents (see `store::file`).
//!
//! Invariants:
//! - Every `to_*` function is total: unconvertible input yields the zero
//!   value of the target type (`0`, `0.0`, `false`, `""`, `[]`, `{}`).
//! - Only [`try_to_string_map`] reports failure, through [`CastError`].
//! - Numeric strings are parsed as floats first so `"3.0"` converts to `3`.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Errors produced by the map conversion.
#[derive(Error, Debug)]
pub enum CastError {
    #[error("unable to cast {value} of type {kind} to map")]
    Unsupported { value: String, kind: &'static str },

    #[error("unable to parse string as a JSON object: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Short name of the kind carried by `value`, used in diagnostics.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

/// Convert to a 64-bit integer.
///
/// Floats are truncated toward zero (saturating at the `i64` bounds), and
/// strings go through a float parse before an integer parse.
pub fn to_int64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => number_to_i64(n),
        Value::String(s) => parse_int(s),
        _ => 0,
    }
}

/// Convert to a platform-width integer.
///
/// Same as [`to_int64`] on 64-bit targets; narrower targets saturate.
pub fn to_int(value: &Value) -> isize {
    let wide = to_int64(value);
    isize::try_from(wide).unwrap_or(if wide < 0 { isize::MIN } else { isize::MAX })
}

/// Convert to a float.
pub fn to_float(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Convert to a boolean.
///
/// Numbers are truthy when strictly positive; strings must be one of the
/// literals accepted by [`parse_bool_literal`].
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f > 0.0),
        Value::String(s) => parse_bool_literal(s).unwrap_or(false),
        _ => false,
    }
}

/// Strict boolean literal parser.
pub fn parse_bool_literal(input: &str) -> Option<bool> {
    match input {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Convert to a string.
///
/// Numbers use their shortest round-trippable decimal form without an
/// exponent; null, lists and maps become the empty string.
pub fn to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Convert to a list of strings.
///
/// Lists stringify each element. A plain string is split on runs of
/// whitespace, never on commas: `"a, b"` yields `["a,", "b"]`.
pub fn to_string_slice(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(to_string).collect(),
        Value::String(s) => s.split_whitespace().map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Convert to a string-keyed map, reporting unsupported input.
///
/// Maps pass through unchanged and strings are parsed as a JSON object.
pub fn try_to_string_map(value: &Value) -> Result<Map<String, Value>, CastError> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        Value::String(s) => Ok(serde_json::from_str(s)?),
        other => Err(CastError::Unsupported {
            value: other.to_string(),
            kind: kind_name(other),
        }),
    }
}

/// Convert to a string-keyed map, yielding an empty map on failure.
pub fn to_string_map(value: &Value) -> Map<String, Value> {
    try_to_string_map(value).unwrap_or_default()
}

/// True when `value` equals the zero value of its kind.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn number_to_i64(n: &Number) -> i64 {
    if let Some(i) = n.as_i64() {
        i
    } else if let Some(u) = n.as_u64() {
        i64::try_from(u).unwrap_or(i64::MAX)
    } else {
        // `as` truncates toward zero, saturates, and maps NaN to 0.
        n.as_f64().map_or(0, |f| f as i64)
    }
}

fn parse_int(input: &str) -> i64 {
    match input.parse::<f64>() {
        Ok(f) => f as i64,
        Err(_) => input.parse::<i64>().unwrap_or(0),
    }
}

fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    }
}
