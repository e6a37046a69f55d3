// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamically-typed configuration values.
//!
//! This module provides the `ConfigValue` sum type, which is the universal representation
//! produced by document parsing and stored in the configuration tree, and the `ConfigTree`
//! alias for a nested mapping of such values.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// A nested mapping from string keys to configuration values.
///
/// Nesting happens through [`ConfigValue::Map`]. A `BTreeMap` keeps exports and
/// serialized output in a stable key order.
pub type ConfigTree = BTreeMap<String, ConfigValue>;

/// A dynamically-typed configuration value.
///
/// `ConfigValue` is a closed set of variants so that every conversion and every
/// environment override dispatch is an exhaustive `match` rather than a runtime
/// type inspection.
///
/// Documents parsed from disk produce `I64`/`U64`, `Float`, `String`, `Bool`, `Null`,
/// `Seq` and `Map`. The narrower integer widths, `Duration` and the typed sequences
/// appear when values are set programmatically, and the typed sequences are also
/// produced by environment overrides.
///
/// # Examples
///
/// ```
/// use treecfg::domain::ConfigValue;
///
/// let port = ConfigValue::from(8080u16);
/// assert_eq!(port, ConfigValue::U16(8080));
/// assert!(port.is_numeric());
///
/// let hosts = ConfigValue::from(vec!["a", "b"]);
/// assert_eq!(hosts.type_name(), "string sequence");
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ConfigValue {
    /// An explicit null / absent value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// An 8-bit signed integer.
    I8(i8),
    /// A 16-bit signed integer.
    I16(i16),
    /// A 32-bit signed integer.
    I32(i32),
    /// A 64-bit signed integer.
    I64(i64),
    /// An 8-bit unsigned integer.
    U8(u8),
    /// A 16-bit unsigned integer.
    U16(u16),
    /// A 32-bit unsigned integer.
    U32(u32),
    /// A 64-bit unsigned integer.
    U64(u64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    String(String),
    /// A time span.
    Duration(Duration),
    /// A sequence with no declared element type, as parsed from a document.
    Seq(Vec<ConfigValue>),
    /// A sequence of strings.
    StringSeq(Vec<String>),
    /// A sequence of integers.
    IntSeq(Vec<i64>),
    /// A nested mapping.
    Map(ConfigTree),
}

impl ConfigValue {
    /// Returns a short, human-readable name of the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "bool",
            ConfigValue::I8(_) => "i8",
            ConfigValue::I16(_) => "i16",
            ConfigValue::I32(_) => "i32",
            ConfigValue::I64(_) => "i64",
            ConfigValue::U8(_) => "u8",
            ConfigValue::U16(_) => "u16",
            ConfigValue::U32(_) => "u32",
            ConfigValue::U64(_) => "u64",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Duration(_) => "duration",
            ConfigValue::Seq(_) => "sequence",
            ConfigValue::StringSeq(_) => "string sequence",
            ConfigValue::IntSeq(_) => "integer sequence",
            ConfigValue::Map(_) => "map",
        }
    }

    /// Returns `true` for integer and floating-point variants.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ConfigValue::I8(_)
                | ConfigValue::I16(_)
                | ConfigValue::I32(_)
                | ConfigValue::I64(_)
                | ConfigValue::U8(_)
                | ConfigValue::U16(_)
                | ConfigValue::U32(_)
                | ConfigValue::U64(_)
                | ConfigValue::Float(_)
        )
    }

    /// Returns `true` if this value is a nested mapping.
    pub fn is_map(&self) -> bool {
        matches!(self, ConfigValue::Map(_))
    }

    /// Returns the nested mapping, if this value is one.
    pub fn as_map(&self) -> Option<&ConfigTree> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the string slice, if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        ConfigValue::Bool(v)
    }
}

impl From<i8> for ConfigValue {
    fn from(v: i8) -> Self {
        ConfigValue::I8(v)
    }
}

impl From<i16> for ConfigValue {
    fn from(v: i16) -> Self {
        ConfigValue::I16(v)
    }
}

impl From<i32> for ConfigValue {
    fn from(v: i32) -> Self {
        ConfigValue::I32(v)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        ConfigValue::I64(v)
    }
}

impl From<u8> for ConfigValue {
    fn from(v: u8) -> Self {
        ConfigValue::U8(v)
    }
}

impl From<u16> for ConfigValue {
    fn from(v: u16) -> Self {
        ConfigValue::U16(v)
    }
}

impl From<u32> for ConfigValue {
    fn from(v: u32) -> Self {
        ConfigValue::U32(v)
    }
}

impl From<u64> for ConfigValue {
    fn from(v: u64) -> Self {
        ConfigValue::U64(v)
    }
}

impl From<f32> for ConfigValue {
    fn from(v: f32) -> Self {
        ConfigValue::Float(f64::from(v))
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        ConfigValue::Float(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        ConfigValue::String(v.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        ConfigValue::String(v)
    }
}

impl From<Duration> for ConfigValue {
    fn from(v: Duration) -> Self {
        ConfigValue::Duration(v)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(v: Vec<ConfigValue>) -> Self {
        ConfigValue::Seq(v)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(v: Vec<String>) -> Self {
        ConfigValue::StringSeq(v)
    }
}

impl From<Vec<&str>> for ConfigValue {
    fn from(v: Vec<&str>) -> Self {
        ConfigValue::StringSeq(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<i64>> for ConfigValue {
    fn from(v: Vec<i64>) -> Self {
        ConfigValue::IntSeq(v)
    }
}

impl From<ConfigTree> for ConfigValue {
    fn from(v: ConfigTree) -> Self {
        ConfigValue::Map(v)
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(ConfigValue::Null)
    }
}

/// Durations serialize in `humantime` form (for example `"1m 30s"`) so that they
/// survive a round trip through a text document and back through the coercion layer.
impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Null => serializer.serialize_unit(),
            ConfigValue::Bool(v) => serializer.serialize_bool(*v),
            ConfigValue::I8(v) => serializer.serialize_i8(*v),
            ConfigValue::I16(v) => serializer.serialize_i16(*v),
            ConfigValue::I32(v) => serializer.serialize_i32(*v),
            ConfigValue::I64(v) => serializer.serialize_i64(*v),
            ConfigValue::U8(v) => serializer.serialize_u8(*v),
            ConfigValue::U16(v) => serializer.serialize_u16(*v),
            ConfigValue::U32(v) => serializer.serialize_u32(*v),
            ConfigValue::U64(v) => serializer.serialize_u64(*v),
            ConfigValue::Float(v) => serializer.serialize_f64(*v),
            ConfigValue::String(v) => serializer.serialize_str(v),
            ConfigValue::Duration(v) => serializer.collect_str(&humantime::format_duration(*v)),
            ConfigValue::Seq(v) => v.serialize(serializer),
            ConfigValue::StringSeq(v) => v.serialize(serializer),
            ConfigValue::IntSeq(v) => v.serialize(serializer),
            ConfigValue::Map(v) => v.serialize(serializer),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "null"),
            ConfigValue::Bool(v) => write!(f, "{}", v),
            ConfigValue::I8(v) => write!(f, "{}", v),
            ConfigValue::I16(v) => write!(f, "{}", v),
            ConfigValue::I32(v) => write!(f, "{}", v),
            ConfigValue::I64(v) => write!(f, "{}", v),
            ConfigValue::U8(v) => write!(f, "{}", v),
            ConfigValue::U16(v) => write!(f, "{}", v),
            ConfigValue::U32(v) => write!(f, "{}", v),
            ConfigValue::U64(v) => write!(f, "{}", v),
            ConfigValue::Float(v) => write!(f, "{}", v),
            ConfigValue::String(v) => write!(f, "{}", v),
            ConfigValue::Duration(v) => write!(f, "{}", humantime::format_duration(*v)),
            ConfigValue::Seq(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            ConfigValue::StringSeq(items) => write!(f, "[{}]", items.join(", ")),
            ConfigValue::IntSeq(items) => {
                let parts: Vec<String> = items.iter().map(i64::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            ConfigValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
