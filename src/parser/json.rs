//! Parser for `.json` files.

use serde_json::Value;

use super::join_path;
use crate::error::ConfigError;

/// Parse JSON content into flattened key/value pairs.
pub fn parse(content: &str) -> Result<Vec<(String, String)>, ConfigError> {
    let root: Value = serde_json::from_str(content)?;
    let mut pairs = Vec::new();
    flatten("", &root, &mut pairs);
    Ok(pairs)
}

fn flatten(prefix: &str, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten(&join_path(prefix, key), child, pairs);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if item.is_object() || item.is_array() {
                    flatten(&format!("{}[{}]", prefix, index), item, pairs);
                } else {
                    // Scalar elements all land under the bare key; the store
                    // resolves key[i] lookups by position.
                    pairs.push((prefix.to_string(), scalar_to_string(item)));
                }
            }
        }
        scalar => pairs.push((prefix.to_string(), scalar_to_string(scalar))),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
