//! Type coercion for raw property values.
//!
//! All supported target types are enumerated in [`Kind`]. The typed getters on
//! `Config` go through [`FromProperty`]; the generic entry point resolves a
//! caller-supplied type name with [`Kind::from_name`], which rejects anything
//! outside the enumeration.

use std::fmt;

use crate::error::ConfigError;

/// The closed set of supported target kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// UTF-8 string (raw value as-is)
    String,
    /// `true` / `false`
    Boolean,
    /// 32-bit signed integer
    Integer,
    /// 64-bit signed integer
    Long,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Single character
    Character,
}

impl Kind {
    /// All supported kinds.
    pub const ALL: &'static [Kind] = &[
        Kind::String,
        Kind::Boolean,
        Kind::Integer,
        Kind::Long,
        Kind::Float,
        Kind::Double,
        Kind::Character,
    ];

    /// Canonical name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Long => "long",
            Kind::Float => "float",
            Kind::Double => "double",
            Kind::Character => "character",
        }
    }

    /// Resolve a type name to a kind.
    ///
    /// Accepts the canonical names plus common aliases (`int`, `bool`,
    /// `i32`, `i64`, `f32`, `f64`, `str`, `char`). Anything else is an
    /// [`ConfigError::UnsupportedType`].
    pub fn from_name(name: &str) -> Result<Kind, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(Kind::String),
            "boolean" | "bool" => Ok(Kind::Boolean),
            "integer" | "int" | "i32" => Ok(Kind::Integer),
            "long" | "i64" => Ok(Kind::Long),
            "float" | "f32" => Ok(Kind::Float),
            "double" | "f64" => Ok(Kind::Double),
            "character" | "char" => Ok(Kind::Character),
            _ => Err(ConfigError::UnsupportedType {
                requested: name.to_string(),
            }),
        }
    }

    /// Comma-separated list of the canonical kind names, for error messages.
    pub fn supported_names() -> String {
        Kind::ALL
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A coerced property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Character(char),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(v) => f.write_str(v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Character(v) => write!(f, "{}", v),
        }
    }
}

/// Conversion from a raw property string to a concrete type.
///
/// Implemented for exactly the types enumerated by [`Kind`].
pub trait FromProperty: Sized {
    /// The kind this implementation corresponds to.
    const KIND: Kind;

    /// Parse the raw value, `None` if it is malformed.
    fn from_property(raw: &str) -> Option<Self>;
}

impl FromProperty for String {
    const KIND: Kind = Kind::String;

    fn from_property(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl FromProperty for bool {
    const KIND: Kind = Kind::Boolean;

    // Strict: only "true"/"false" (case-insensitive) are accepted.
    fn from_property(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Some(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl FromProperty for i32 {
    const KIND: Kind = Kind::Integer;

    fn from_property(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromProperty for i64 {
    const KIND: Kind = Kind::Long;

    fn from_property(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromProperty for f32 {
    const KIND: Kind = Kind::Float;

    fn from_property(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromProperty for f64 {
    const KIND: Kind = Kind::Double;

    fn from_property(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromProperty for char {
    const KIND: Kind = Kind::Character;

    fn from_property(raw: &str) -> Option<Self> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

/// Coerce a raw value to the given kind.
pub fn coerce(key: &str, raw: &str, kind: Kind) -> Result<Value, ConfigError> {
    fn parse<T: FromProperty>(key: &str, raw: &str) -> Result<T, ConfigError> {
        T::from_property(raw).ok_or_else(|| ConfigError::Parse {
            key: key.to_string(),
            value: raw.to_string(),
            kind: T::KIND,
        })
    }

    Ok(match kind {
        Kind::String => Value::String(parse(key, raw)?),
        Kind::Boolean => Value::Boolean(parse(key, raw)?),
        Kind::Integer => Value::Integer(parse(key, raw)?),
        Kind::Long => Value::Long(parse(key, raw)?),
        Kind::Float => Value::Float(parse(key, raw)?),
        Kind::Double => Value::Double(parse(key, raw)?),
        Kind::Character => Value::Character(parse(key, raw)?),
    })
}

/// Split a delimited string into trimmed, non-empty elements.
///
/// A single surrounding `[...]` bracket pair is stripped first, so both
/// `a, b, c` and `[a, b, c]` yield the same result.
pub fn split_list(text: &str, separator: char) -> Vec<String> {
    let trimmed = text.trim();
    let inner = if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() >= 2 {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    inner
        .split(separator)
        .map(str::trim)
        .filter(|element| !element.is_empty())
        .map(str::to_string)
        .collect()
}
