//! Parser for `.yaml` / `.yml` files.

use serde_yaml::Value;

use super::join_path;
use crate::error::ConfigError;

/// Parse YAML content into flattened key/value pairs.
pub fn parse(content: &str) -> Result<Vec<(String, String)>, ConfigError> {
    // An empty document deserializes to Null; treat it as no properties
    let root: Value = serde_yaml::from_str(content)?;
    let mut pairs = Vec::new();
    if !root.is_null() {
        flatten("", &root, &mut pairs);
    }
    Ok(pairs)
}

fn flatten(prefix: &str, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                let Some(segment) = scalar_key(key) else {
                    continue;
                };
                flatten(&join_path(prefix, &segment), child, pairs);
            }
        }
        Value::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                if item.is_mapping() || item.is_sequence() {
                    flatten(&format!("{}[{}]", prefix, index), item, pairs);
                } else {
                    pairs.push((prefix.to_string(), scalar_to_string(item)));
                }
            }
        }
        Value::Tagged(tagged) => flatten(prefix, &tagged.value, pairs),
        scalar => pairs.push((prefix.to_string(), scalar_to_string(scalar))),
    }
}

/// Mapping keys are usually strings, but YAML allows numbers and booleans.
fn scalar_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
