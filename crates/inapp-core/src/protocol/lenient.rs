//! Lenient single-field readers.
//!
//! Producers are not strict about JSON types (numbers arrive as strings,
//! booleans as `"true"`), so every reader coerces the obvious cases and maps
//! everything else to `None`. Defaults are applied by the caller.

use serde_json::{Map, Value};

use super::keys;

/// Read a string field. Numbers and booleans are stringified; `null`,
/// arrays, and objects are treated as absent.
pub fn opt_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read an integer field. Floats are truncated; numeric strings are parsed.
pub fn opt_i64(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

/// Same as [`opt_i64`], narrowed to `i32` (out-of-range values are absent).
pub fn opt_i32(obj: &Map<String, Value>, key: &str) -> Option<i32> {
    opt_i64(obj, key).and_then(|v| i32::try_from(v).ok())
}

/// Read a floating point field; numeric strings are parsed.
pub fn opt_f64(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Read a boolean field; `"true"` / `"false"` strings are accepted in any case.
pub fn opt_bool(obj: &Map<String, Value>, key: &str) -> Option<bool> {
    match obj.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// Read a nested object. Any other JSON type is absent.
pub fn opt_object<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    obj.get(key).and_then(Value::as_object)
}

/// Custom payload fallback chain: message-level `customPayload`, then the
/// legacy `payload` under content, then an empty map.
pub fn custom_payload(
    message: &Map<String, Value>,
    content: &Map<String, Value>,
) -> Map<String, Value> {
    opt_object(message, keys::CUSTOM_PAYLOAD)
        .or_else(|| opt_object(content, keys::LEGACY_PAYLOAD))
        .cloned()
        .unwrap_or_default()
}

/// Epoch-millis timestamp; `0` is the wire sentinel for "not set".
pub fn opt_timestamp_millis(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    opt_i64(obj, key).filter(|ms| *ms != 0)
}

/// Background alpha, accepting the legacy field name; defaults to `0`.
pub fn background_alpha(content: &Map<String, Value>) -> f64 {
    opt_f64(content, keys::BACKGROUND_ALPHA)
        .or_else(|| opt_f64(content, keys::LEGACY_BACKGROUND_ALPHA))
        .unwrap_or(0.0)
}

fn truncate(f: f64) -> Option<i64> {
    if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}
