//! Deep merge of JSON override documents onto a JSON base.
//!
//! Scalars, `null` and arrays in the override replace whatever the base holds
//! at the same key. Objects merge recursively when the base already holds an
//! object there and are inserted verbatim otherwise, which also replaces a
//! non-object base value. Inputs are never modified: a failed merge returns an
//! error and the caller keeps its original bytes.

use crate::{ConfigError, ConfigResult};
use log::debug;
use serde_json::{Map, Value};


/// Merge every top-level key of `overlay` onto `base`, returning a new document.
///
/// Both inputs must be JSON objects, except that a `null` override (an empty
/// or comment-only YAML file) merges nothing. Keys are applied one at a time,
/// each as an independent [`merge_value`] step.
pub fn merge_documents(base: &[u8], overlay: &[u8]) -> ConfigResult<Vec<u8>> {
    let mut merged = parse_object(base, "base")?;
    let overlay = parse_overlay(overlay)?;
    debug!(
        "merging override onto base (base_keys={}, override_keys={})",
        merged.len(),
        overlay.len()
    );
    for (key, value) in overlay {
        merge_json_values(&mut merged, key, value);
    }
    render(merged)
}

/// Merge a single `key` holding the JSON `value` onto `base`.
pub fn merge_value(base: &[u8], key: &str, value: &[u8]) -> ConfigResult<Vec<u8>> {
    let mut merged = parse_object(base, "base")?;
    let value: Value = serde_json::from_slice(value).map_err(|err| ConfigError::Merge {
        label: format!("override value for {key}"),
        message: err.to_string(),
    })?;
    merge_json_values(&mut merged, key.to_string(), value);
    render(merged)
}

/// Merge one overlay entry into the base map, recursing through nested objects.
pub(crate) fn merge_json_values(base: &mut Map<String, Value>, key: String, overlay: Value) {
    match overlay {
        Value::Object(overlay_map) => {
            if let Some(Value::Object(existing)) = base.get_mut(&key) {
                for (child_key, child_value) in overlay_map {
                    merge_json_values(existing, child_key, child_value);
                }
                return;
            }
            base.insert(key, Value::Object(overlay_map));
        }
        overlay_value => {
            base.insert(key, overlay_value);
        }
    }
}

fn parse_overlay(bytes: &[u8]) -> ConfigResult<Map<String, Value>> {
    if matches!(serde_json::from_slice(bytes), Ok(Value::Null)) {
        debug!("override document is null; nothing to merge");
        return Ok(Map::new());
    }
    parse_object(bytes, "override")
}

fn parse_object(bytes: &[u8], label: &str) -> ConfigResult<Map<String, Value>> {
    match serde_json::from_slice(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ConfigError::Merge {
            label: label.to_string(),
            message: format!("expected a json object, found {}", kind(&other)),
        }),
        Err(err) => Err(ConfigError::Merge {
            label: label.to_string(),
            message: err.to_string(),
        }),
    }
}

fn render(map: Map<String, Value>) -> ConfigResult<Vec<u8>> {
    serde_json::to_vec(&Value::Object(map)).map_err(|err| ConfigError::Merge {
        label: "result".to_string(),
        message: err.to_string(),
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
