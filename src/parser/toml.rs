//! Parser for `.toml` files.

use ::toml::Value;

use super::join_path;
use crate::error::ConfigError;

/// Parse TOML content into flattened key/value pairs.
pub fn parse(content: &str) -> Result<Vec<(String, String)>, ConfigError> {
    let root: Value = ::toml::from_str(content)?;
    let mut pairs = Vec::new();
    flatten("", &root, &mut pairs);
    Ok(pairs)
}

fn flatten(prefix: &str, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Table(table) => {
            for (key, child) in table {
                flatten(&join_path(prefix, key), child, pairs);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if item.is_table() || item.is_array() {
                    flatten(&format!("{}[{}]", prefix, index), item, pairs);
                } else {
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
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_flatten_to_dotted_keys() {
        let content = "\
[env.test1]
test-of-env-int1 = 50

[server]
host = \"localhost\"
port = 8080
";
        let pairs = parse(content).unwrap();
        assert!(pairs.contains(&("env.test1.test-of-env-int1".to_string(), "50".to_string())));
        assert!(pairs.contains(&("server.host".to_string(), "localhost".to_string())));
        assert!(pairs.contains(&("server.port".to_string(), "8080".to_string())));
    }

    #[test]
    fn test_scalar_arrays_repeat_under_bare_key() {
        let pairs = parse("ports = [8080, 8081]").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("ports".to_string(), "8080".to_string()),
                ("ports".to_string(), "8081".to_string()),
            ]
        );
    }

    #[test]
    fn test_array_of_tables() {
        let content = "\
[[hosts]]
name = \"a\"

[[hosts]]
name = \"b\"
";
        let pairs = parse(content).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("hosts[0].name".to_string(), "a".to_string()),
                ("hosts[1].name".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(matches!(parse("= nope"), Err(ConfigError::Toml(_))));
    }
}
