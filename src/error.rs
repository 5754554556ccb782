//! Error types for envconf.

use thiserror::Error;

use crate::convert::Kind;

/// Main error type for envconf.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Requested coercion to a type outside the supported set
    #[error("unsupported target type '{requested}' (supported: {})", Kind::supported_names())]
    UnsupportedType {
        /// Type name as given by the caller
        requested: String,
    },

    /// A value exists but could not be parsed as the requested kind
    #[error("property '{key}': value '{value}' is not a valid {kind}")]
    Parse {
        /// Property key
        key: String,
        /// Raw value that failed to parse
        value: String,
        /// Kind that was requested
        kind: Kind,
    },

    /// No parser exists for a configuration file extension
    #[error("no parser for configuration file '{0}'")]
    UnsupportedFormat(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
