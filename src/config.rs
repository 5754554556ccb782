//! Typed configuration accessor.

use std::fmt;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::convert::{coerce, split_list, FromProperty, Kind, Value};
use crate::error::ConfigError;
use crate::loader::ConfigBuilder;
use crate::store::PropertyStore;

/// Immutable view over all loaded configuration properties.
///
/// A `Config` is constructed once (via [`Config::load`] or a
/// [`ConfigBuilder`]) and only read afterwards, so sharing it across threads
/// needs no locking. For tests, [`Config::from_store`] wraps a hand-built
/// [`PropertyStore`].
pub struct Config {
    store: PropertyStore,
    loaded_files: Vec<PathBuf>,
}

impl Config {
    /// Load configuration from the default sources in the current directory.
    pub fn load() -> anyhow::Result<Config> {
        ConfigBuilder::new().load()
    }

    /// Start building a configuration with explicit sources.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Wrap an already populated store. Intended for tests and embedding.
    pub fn from_store(store: PropertyStore) -> Config {
        Config {
            store,
            loaded_files: Vec::new(),
        }
    }

    pub(crate) fn new(store: PropertyStore, loaded_files: Vec<PathBuf>) -> Config {
        Config {
            store,
            loaded_files,
        }
    }

    /// The effective raw string value for a key, if present.
    ///
    /// Honors `key[i]` index syntax for multi-valued properties.
    pub fn raw(&self, key: &str) -> Option<&str> {
        let value = self.store.get(key);
        debug!("Getting configuration '{}'. Got: {:?}", key, value);
        value
    }

    /// Generic typed retrieval with a caller-supplied type name.
    ///
    /// The type name is resolved against the closed set of supported kinds
    /// first, so an unsupported name fails with
    /// [`ConfigError::UnsupportedType`] regardless of whether the key
    /// resolves. A missing key is `Ok(None)`; a present but malformed value
    /// is [`ConfigError::Parse`].
    pub fn get(&self, key: &str, type_name: &str) -> Result<Option<Value>, ConfigError> {
        let kind = Kind::from_name(type_name)?;
        self.get_kind(key, kind)
    }

    /// Typed retrieval for an already resolved [`Kind`].
    pub fn get_kind(&self, key: &str, kind: Kind) -> Result<Option<Value>, ConfigError> {
        match self.raw(key) {
            Some(value) => coerce(key, value, kind).map(Some),
            None => Ok(None),
        }
    }

    /// Typed retrieval through the [`FromProperty`] trait.
    pub fn get_as<T: FromProperty>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        let Some(value) = self.raw(key) else {
            return Ok(None);
        };
        T::from_property(value)
            .map(Some)
            .ok_or_else(|| ConfigError::Parse {
                key: key.to_string(),
                value: value.to_string(),
                kind: T::KIND,
            })
    }

    /// Typed retrieval with a default for missing keys.
    ///
    /// The default is only used when the key is absent; a present but
    /// malformed value still fails.
    pub fn get_or<T: FromProperty>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        Ok(self.get_as(key)?.unwrap_or(default))
    }

    /// Fetch a property as a string.
    pub fn get_string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        self.get_as(key)
    }

    /// Fetch a property as a string, with a default for missing keys.
    pub fn get_string_or(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        self.get_or(key, default.to_string())
    }

    /// Fetch a property as a boolean.
    pub fn get_boolean(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        self.get_as(key)
    }

    /// Fetch a property as a boolean, with a default for missing keys.
    pub fn get_boolean_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        self.get_or(key, default)
    }

    /// Fetch a property as a 32-bit integer.
    pub fn get_integer(&self, key: &str) -> Result<Option<i32>, ConfigError> {
        self.get_as(key)
    }

    /// Fetch a property as a 32-bit integer, with a default for missing keys.
    pub fn get_integer_or(&self, key: &str, default: i32) -> Result<i32, ConfigError> {
        self.get_or(key, default)
    }

    /// Fetch a property as a 64-bit integer.
    pub fn get_long(&self, key: &str) -> Result<Option<i64>, ConfigError> {
        self.get_as(key)
    }

    /// Fetch a property as a 64-bit integer, with a default for missing keys.
    pub fn get_long_or(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        self.get_or(key, default)
    }

    /// Fetch a property as a 32-bit float.
    pub fn get_float(&self, key: &str) -> Result<Option<f32>, ConfigError> {
        self.get_as(key)
    }

    /// Fetch a property as a 32-bit float, with a default for missing keys.
    pub fn get_float_or(&self, key: &str, default: f32) -> Result<f32, ConfigError> {
        self.get_or(key, default)
    }

    /// Fetch a property as a 64-bit float.
    pub fn get_double(&self, key: &str) -> Result<Option<f64>, ConfigError> {
        self.get_as(key)
    }

    /// Fetch a property as a 64-bit float, with a default for missing keys.
    pub fn get_double_or(&self, key: &str, default: f64) -> Result<f64, ConfigError> {
        self.get_or(key, default)
    }

    /// Fetch a property as a single character.
    pub fn get_character(&self, key: &str) -> Result<Option<char>, ConfigError> {
        self.get_as(key)
    }

    /// Fetch a property as a single character, with a default for missing
    /// keys.
    pub fn get_character_or(&self, key: &str, default: char) -> Result<char, ConfigError> {
        self.get_or(key, default)
    }

    /// Fetch a property as a list of strings.
    ///
    /// A key set multiple times yields all values in order; a key set once
    /// to a bracketed value like `[a, b, c]` is split on commas. Missing
    /// keys yield an empty list.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        match self.store.get_all(key) {
            None => Vec::new(),
            Some([single]) if single.trim().starts_with('[') => split_list(single, ','),
            Some(values) => values.to_vec(),
        }
    }

    /// Fetch a property as a typed list.
    pub fn get_typed_list<T: FromProperty>(&self, key: &str) -> Result<Vec<T>, ConfigError> {
        self.get_list(key)
            .into_iter()
            .map(|value| {
                T::from_property(&value).ok_or_else(|| ConfigError::Parse {
                    key: key.to_string(),
                    value,
                    kind: T::KIND,
                })
            })
            .collect()
    }

    /// Deserialize the subtree under `prefix` into a structured type.
    ///
    /// The flattened properties are rebuilt into a nested value (dots become
    /// nesting, `key[i]` paths become arrays) and handed to serde. Returns
    /// `Ok(None)` when no property lives under the prefix.
    pub fn extract<T: DeserializeOwned>(&self, prefix: &str) -> Result<Option<T>, ConfigError> {
        let Some(tree) = self.subtree(prefix) else {
            return Ok(None);
        };
        serde_json::from_value(tree).map(Some).map_err(Into::into)
    }

    /// All normalized keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.store.keys()
    }

    /// Iterate over all entries, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.store.iter()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether no properties are loaded.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The files that contributed properties, in load order. Later files
    /// override earlier ones.
    pub fn loaded_files(&self) -> &[PathBuf] {
        &self.loaded_files
    }

    /// Rebuild the nested value under a prefix from the flattened store.
    fn subtree(&self, prefix: &str) -> Option<serde_json::Value> {
        let prefix = self.store.normalize(prefix);

        let mut leaf_only: Option<serde_json::Value> = None;
        let mut root = serde_json::Value::Object(serde_json::Map::new());
        let mut matched = false;

        for (key, values) in self.store.iter() {
            let relative = if prefix.is_empty() {
                Some(key)
            } else if key == prefix {
                leaf_only = Some(leaf_value(values));
                matched = true;
                None
            } else {
                // `prefix.rest` nests below the prefix, `prefix[0].rest` is
                // an indexed element directly under it
                key.strip_prefix(prefix.as_str()).and_then(|rest| {
                    rest.strip_prefix('.')
                        .or_else(|| rest.starts_with('[').then_some(rest))
                })
            };

            if let Some(relative) = relative {
                matched = true;
                let segments: Vec<&str> = relative.split('.').collect();
                insert_path(&mut root, &segments, values);
            }
        }

        if !matched {
            return None;
        }
        // Indexed-only subtrees build under an empty segment name; unwrap it
        if let serde_json::Value::Object(map) = &mut root {
            if map.len() == 1 && map.contains_key("") {
                return map.remove("");
            }
        }
        // A bare scalar at the prefix only counts when nothing nests below it
        match root {
            serde_json::Value::Object(ref map) if map.is_empty() => leaf_only,
            structured => Some(structured),
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.store, f)
    }
}

/// Insert a dotted path into a nested JSON value.
fn insert_path(target: &mut serde_json::Value, segments: &[&str], values: &[String]) {
    let (segment, rest) = match segments {
        [] => return,
        [first, rest @ ..] => (*first, rest),
    };
    let (name, index) = split_indexed_segment(segment);

    let map = match target {
        serde_json::Value::Object(map) => map,
        other => {
            // A scalar conflicting with a nested path loses to the structure
            *other = serde_json::Value::Object(serde_json::Map::new());
            match other {
                serde_json::Value::Object(map) => map,
                _ => unreachable!(),
            }
        }
    };

    let slot = map
        .entry(name.to_string())
        .or_insert(serde_json::Value::Null);

    let slot = match index {
        Some(index) => {
            if !slot.is_array() {
                *slot = serde_json::Value::Array(Vec::new());
            }
            let array = slot.as_array_mut().expect("slot was just made an array");
            while array.len() <= index {
                array.push(serde_json::Value::Null);
            }
            &mut array[index]
        }
        None => slot,
    };

    if rest.is_empty() {
        *slot = leaf_value(values);
    } else {
        if !slot.is_object() {
            *slot = serde_json::Value::Object(serde_json::Map::new());
        }
        insert_path(slot, rest, values);
    }
}

/// Split `name[3]` into `("name", Some(3))`.
fn split_indexed_segment(segment: &str) -> (&str, Option<usize>) {
    if let Some(stripped) = segment.strip_suffix(']') {
        if let Some((name, index)) = stripped.rsplit_once('[') {
            if let Ok(index) = index.parse() {
                return (name, Some(index));
            }
        }
    }
    (segment, None)
}

fn leaf_value(values: &[String]) -> serde_json::Value {
    match values {
        [single] => scalar_value(single),
        many => serde_json::Value::Array(many.iter().map(|v| scalar_value(v)).collect()),
    }
}

/// Best-effort scalar typing so numeric and boolean fields deserialize.
fn scalar_value(raw: &str) -> serde_json::Value {
    if raw.eq_ignore_ascii_case("true") {
        return serde_json::Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return serde_json::Value::Bool(false);
    }
    if let Ok(int) = raw.parse::<i64>() {
        return serde_json::Value::Number(int.into());
    }
    if let Ok(float) = raw.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(float) {
            return serde_json::Value::Number(number);
        }
    }
    serde_json::Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn sample_config() -> Config {
        let mut store = PropertyStore::new();
        store.put("env.test1.test-of-env-int1", "50");
        store.put("env.test1.test-of-env-str1", "hello");
        store.put("env.test1.enabled", "true");
        store.put("env.test1.ratio", "0.5");
        Config::from_store(store)
    }

    #[test]
    fn test_integer_with_default_prefers_stored_value() {
        let config = sample_config();
        assert_eq!(
            config.get_integer_or("env.test1.test-of-env-int1", 10).unwrap(),
            50
        );
    }

    #[test]
    fn test_integer_default_used_when_absent() {
        let config = sample_config();
        assert_eq!(
            config.get_integer_or("property.does.not.exist", 50).unwrap(),
            50
        );
    }

    #[test]
    fn test_integer_absent_without_default_is_none() {
        let config = sample_config();
        assert_eq!(config.get_integer("property.does.not.exist").unwrap(), None);
    }

    #[test]
    fn test_unsupported_type_fails_even_when_key_resolves() {
        let config = sample_config();
        let err = config
            .get("env.test1.test-of-env-int1", "com.example.CustomClass")
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedType { .. }));

        let err = config
            .get("property.does.not.exist", "com.example.CustomClass")
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedType { .. }));
    }

    #[test]
    fn test_generic_get_matches_typed_getter() {
        let config = sample_config();
        assert_eq!(
            config.get("env.test1.test-of-env-int1", "integer").unwrap(),
            Some(Value::Integer(50))
        );
        assert_eq!(
            config.get("env.test1.enabled", "bool").unwrap(),
            Some(Value::Boolean(true))
        );
        assert_eq!(
            config.get("env.test1.ratio", "double").unwrap(),
            Some(Value::Double(0.5))
        );
    }

    #[test]
    fn test_malformed_value_is_parse_error_not_default() {
        let config = sample_config();
        let err = config
            .get_integer_or("env.test1.test-of-env-str1", 99)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_repeated_lookups_are_idempotent() {
        let config = sample_config();
        for _ in 0..3 {
            assert_eq!(
                config.get_integer("env.test1.test-of-env-int1").unwrap(),
                Some(50)
            );
        }
    }

    #[test]
    fn test_list_getters() {
        let mut store = PropertyStore::new();
        store.put("servers", "alpha");
        store.put("servers", "beta");
        store.put("ports", "[8080, 8081]");
        let config = Config::from_store(store);

        assert_eq!(config.get_list("servers"), vec!["alpha", "beta"]);
        assert_eq!(config.get_typed_list::<i32>("ports").unwrap(), vec![8080, 8081]);
        assert!(config.get_list("missing").is_empty());
        assert!(config.get_typed_list::<i32>("servers").is_err());
    }

    #[test]
    fn test_extract_subtree() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Server {
            host: String,
            port: u16,
            tls: bool,
        }

        let mut store = PropertyStore::new();
        store.put("server.host", "localhost");
        store.put("server.port", "8080");
        store.put("server.tls", "false");
        store.put("unrelated", "x");
        let config = Config::from_store(store);

        let server: Server = config.extract("server").unwrap().unwrap();
        assert_eq!(
            server,
            Server {
                host: "localhost".to_string(),
                port: 8080,
                tls: false,
            }
        );
        assert_eq!(config.extract::<Server>("nope").unwrap(), None);
    }

    #[test]
    fn test_extract_indexed_paths_become_arrays() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Host {
            name: String,
        }

        let mut store = PropertyStore::new();
        store.put("cluster.hosts[0].name", "a");
        store.put("cluster.hosts[1].name", "b");
        let config = Config::from_store(store);

        let hosts: Vec<Host> = config.extract("cluster.hosts").unwrap().unwrap();
        assert_eq!(
            hosts,
            vec![
                Host { name: "a".to_string() },
                Host { name: "b".to_string() },
            ]
        );
    }
}
