//! Raw property storage.
//!
//! [`PropertyStore`] is an ordered multimap from normalized dotted keys to the
//! string values collected from every source. Repeated puts for the same key
//! append, so later sources override earlier ones without losing history;
//! plain lookups return the last value, `key[i]` lookups select by index.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;

/// Normalizes property keys into the canonical dotted form.
///
/// `SERVER_PORT`, `server.port` and `serverPort` all address the same
/// property: keys are trimmed, `_` becomes `.`, camelCase boundaries become
/// kebab-case, and the result is lowercased.
struct KeyNormalizer {
    camel_boundary: Regex,
    array_suffix: Regex,
}

impl KeyNormalizer {
    fn new() -> Self {
        Self {
            camel_boundary: Regex::new(r"([a-z])([A-Z])")
                .expect("valid camelCase boundary pattern"),
            array_suffix: Regex::new(r"^(?<base>.+)\[(?<index>\d+)\]$")
                .expect("valid array suffix pattern"),
        }
    }

    fn normalize(&self, key: &str) -> String {
        let underscores_replaced = key.trim().replace('_', ".");
        self.camel_boundary
            .replace_all(&underscores_replaced, "$1-$2")
            .to_lowercase()
    }

    /// Split `key[3]` into `("key", 3)`.
    fn split_indexed(&self, key: &str) -> Option<(String, usize)> {
        let captures = self.array_suffix.captures(key)?;
        let index = captures["index"].parse().ok()?;
        Some((captures["base"].to_string(), index))
    }
}

/// Ordered multimap of raw configuration properties.
pub struct PropertyStore {
    entries: BTreeMap<String, Vec<String>>,
    normalizer: KeyNormalizer,
}

impl PropertyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            normalizer: KeyNormalizer::new(),
        }
    }

    /// Insert a value for a key, keeping any previously set values.
    ///
    /// The key is normalized and one layer of matching surrounding quotes is
    /// stripped from the value.
    pub fn put(&mut self, key: &str, value: &str) {
        let key = self.normalizer.normalize(key);
        let value = cleanup_value(value);
        self.entries.entry(key).or_default().push(value);
    }

    /// Insert a batch of key/value pairs in order.
    pub fn put_all<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in pairs {
            self.put(key.as_ref(), value.as_ref());
        }
    }

    /// Look up the effective (last set) value for a key.
    ///
    /// A `key[i]` suffix selects the i:th value set for `key` instead.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = self.normalizer.normalize(key);
        if let Some((base, index)) = self.normalizer.split_indexed(&key) {
            return self
                .entries
                .get(&base)
                .and_then(|values| values.get(index))
                .map(String::as_str);
        }
        self.entries
            .get(&key)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// All values ever set for a key, in insertion order.
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        let key = self.normalizer.normalize(key);
        self.entries.get(&key).map(Vec::as_slice)
    }

    /// Normalize a lookup key the same way stored keys are normalized.
    pub(crate) fn normalize(&self, key: &str) -> String {
        self.normalizer.normalize(key)
    }

    /// Whether the key resolves to at least one value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All normalized keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over all entries, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PropertyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, values) in &self.entries {
            match values.as_slice() {
                [single] => writeln!(f, "{} = {}", key, single)?,
                many => writeln!(f, "{} = [{}]", key, many.join(", "))?,
            }
        }
        Ok(())
    }
}

/// Strip one layer of matching surrounding quotes and trim whitespace.
fn cleanup_value(value: &str) -> String {
    let trimmed = value.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return trimmed[1..trimmed.len() - 1].to_string();
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalization() {
        let mut store = PropertyStore::new();
        store.put("SERVER_PORT", "8080");
        store.put("serverHost", "localhost");
        store.put("  env.test1.test-of-env-int1  ", "50");

        assert_eq!(store.get("server.port"), Some("8080"));
        assert_eq!(store.get("server-host"), Some("localhost"));
        assert_eq!(store.get("env.test1.test-of-env-int1"), Some("50"));
        // Lookup keys are normalized the same way as stored keys
        assert_eq!(store.get("SERVER_PORT"), Some("8080"));
    }

    #[test]
    fn test_last_value_wins() {
        let mut store = PropertyStore::new();
        store.put("app.name", "first");
        store.put("app.name", "second");

        assert_eq!(store.get("app.name"), Some("second"));
        assert_eq!(
            store.get_all("app.name").unwrap(),
            &["first".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn test_indexed_lookup() {
        let mut store = PropertyStore::new();
        store.put("servers", "alpha");
        store.put("servers", "beta");
        store.put("servers", "gamma");

        assert_eq!(store.get("servers[0]"), Some("alpha"));
        assert_eq!(store.get("servers[2]"), Some("gamma"));
        assert_eq!(store.get("servers[3]"), None);
    }

    #[test]
    fn test_value_quote_stripping() {
        let mut store = PropertyStore::new();
        store.put("a", "\"quoted\"");
        store.put("b", "'single'");
        store.put("c", "  padded  ");
        store.put("d", "\"mismatched'");

        assert_eq!(store.get("a"), Some("quoted"));
        assert_eq!(store.get("b"), Some("single"));
        assert_eq!(store.get("c"), Some("padded"));
        assert_eq!(store.get("d"), Some("\"mismatched'"));
    }

    #[test]
    fn test_missing_key() {
        let store = PropertyStore::new();
        assert_eq!(store.get("property.does.not.exist"), None);
        assert!(!store.contains("property.does.not.exist"));
    }
}
