//! Configuration file parsers.
//!
//! Every parser flattens a file into `(dotted key, raw value)` pairs that are
//! fed to the [`PropertyStore`](crate::store::PropertyStore) in file order.
//! Nested structures join path segments with `.`; array elements of scalar
//! type are appended under the bare key (position becomes the `key[i]`
//! index), while array elements that are themselves objects get explicit
//! `key[i].field` paths.

mod json;
mod properties;
mod toml;
mod yaml;

use std::path::Path;

use crate::error::ConfigError;

/// Supported configuration file formats, selected by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.properties` line format
    Properties,
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl FileFormat {
    /// Determine the format for a file path by its extension.
    pub fn from_path(path: &Path) -> Result<FileFormat, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("properties") => Ok(FileFormat::Properties),
            Some("json") => Ok(FileFormat::Json),
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            Some("toml") => Ok(FileFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse file content into flattened key/value pairs.
pub fn parse(format: FileFormat, content: &str) -> Result<Vec<(String, String)>, ConfigError> {
    match format {
        FileFormat::Properties => Ok(properties::parse(content)),
        FileFormat::Json => json::parse(content),
        FileFormat::Yaml => yaml::parse(content),
        FileFormat::Toml => toml::parse(content),
    }
}

/// Join a parent path and a child segment with a dot.
fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_path() {
        let cases = [
            ("application.properties", FileFormat::Properties),
            ("conf/config.json", FileFormat::Json),
            ("application.yml", FileFormat::Yaml),
            ("application.YAML", FileFormat::Yaml),
            ("application.toml", FileFormat::Toml),
        ];
        for (path, expected) in cases {
            assert_eq!(FileFormat::from_path(&PathBuf::from(path)).unwrap(), expected);
        }
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = FileFormat::from_path(&PathBuf::from("config.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
