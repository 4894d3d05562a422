//! Lenient typed parameter extraction from a `serde_json::Value` object.
//!
//! Missing keys or values of the wrong type fall back to the default;
//! these helpers never fail. Range checks belong to the caller.

use serde_json::Value;

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only succeeds if the JSON value is a non-negative integer that fits in `u64`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}
