//! Parser for `.properties` files.
//!
//! Lines are `key = value` pairs; blank lines and `#` comments are skipped.
//! An indexed key like `servers[0] = alpha` is recorded under the bare
//! `servers` key so list getters see every element.

use regex::Regex;

/// Parse `.properties` content into key/value pairs, in file order.
pub fn parse(content: &str) -> Vec<(String, String)> {
    // `key[0]` / `key[0].field` prefixes mark array entries
    let indexed_key = Regex::new(r"^(?<base>.+)\[\d+\]\s*$").expect("valid indexed key pattern");

    let mut pairs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();

        if let Some(captures) = indexed_key.captures(key) {
            pairs.push((captures["base"].trim().to_string(), value.to_string()));
        } else {
            pairs.push((key.to_string(), value.to_string()));
        }
    }
    pairs
}
