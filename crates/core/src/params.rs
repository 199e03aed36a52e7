//! Typed parameter extraction from a `serde_json::Value` object.
//!
//! A missing key falls back to the default. A key that is present but holds
//! the wrong JSON type is an error: sketch configuration is rejected rather
//! than silently coerced.

use crate::error::ContourError;
use serde_json::Value;

/// Human-readable JSON type name for error messages.
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_u64() || n.is_i64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(name: &str, expected: &str, got: &Value) -> ContourError {
    ContourError::ParamTypeMismatch {
        name: name.to_owned(),
        expected: expected.to_owned(),
        got: json_type(got).to_owned(),
    }
}

/// Looks up `name`, treating a non-object `params` as empty.
fn lookup<'a>(params: &'a Value, name: &str) -> Option<&'a Value> {
    params.as_object().and_then(|map| map.get(name))
}

/// Extracts an `f64` from `params[name]`.
///
/// Integers are accepted and converted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> Result<f64, ContourError> {
    match lookup(params, name) {
        None => Ok(default),
        Some(v) => v.as_f64().ok_or_else(|| mismatch(name, "number", v)),
    }
}

/// Extracts a `usize` from `params[name]`. Negative and fractional numbers
/// are type mismatches.
pub fn param_usize(params: &Value, name: &str, default: usize) -> Result<usize, ContourError> {
    match lookup(params, name) {
        None => Ok(default),
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| mismatch(name, "non-negative integer", v)),
    }
}

/// Extracts a `u32` seed-like value from `params[name]`.
pub fn param_u32(params: &Value, name: &str, default: u32) -> Result<u32, ContourError> {
    match lookup(params, name) {
        None => Ok(default),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| mismatch(name, "32-bit unsigned integer", v)),
    }
}

pub fn param_bool(params: &Value, name: &str, default: bool) -> Result<bool, ContourError> {
    match lookup(params, name) {
        None => Ok(default),
        Some(v) => v.as_bool().ok_or_else(|| mismatch(name, "boolean", v)),
    }
}

pub fn param_string(params: &Value, name: &str, default: &str) -> Result<String, ContourError> {
    match lookup(params, name) {
        None => Ok(default.to_owned()),
        Some(v) => v
            .as_str()
            .map(String::from)
            .ok_or_else(|| mismatch(name, "string", v)),
    }
}

/// Extracts an explicit list of numbers, e.g. custom threshold levels.
///
/// Returns `None` when the key is absent.
pub fn param_f64_list(params: &Value, name: &str) -> Result<Option<Vec<f64>>, ContourError> {
    let Some(v) = lookup(params, name) else {
        return Ok(None);
    };
    let items = v.as_array().ok_or_else(|| mismatch(name, "array", v))?;
    items
        .iter()
        .map(|item| item.as_f64().ok_or_else(|| mismatch(name, "array of numbers", item)))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Rejects values that are not finite and strictly positive.
pub fn require_positive(name: &str, value: f64) -> Result<f64, ContourError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ContourError::InvalidParam {
            name: name.to_owned(),
            reason: format!("must be positive and finite, got {value}"),
        })
    }
}

/// Rejects NaN and infinities.
pub fn require_finite(name: &str, value: f64) -> Result<f64, ContourError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ContourError::InvalidParam {
            name: name.to_owned(),
            reason: format!("must be finite, got {value}"),
        })
    }
}
