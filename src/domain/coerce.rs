// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort type coercion.
//!
//! Every function in this module is total: a value that cannot be converted to the
//! requested type yields that type's zero value (`""`, `false`, `0`, `0.0`,
//! `Duration::ZERO`, `None` for sequences, an empty map for mappings). Lookups built on
//! top of these functions therefore never fail at the call site.
//!
//! Strings are parsed strictly: `"42abc"` is not an integer, and nothing is trimmed
//! except by the comma-list helpers [`split_trim`] and [`split_trim_ints`], which are
//! used for raw environment text.

use crate::domain::config_value::{ConfigTree, ConfigValue};
use std::time::Duration;

/// A numeric payload extracted from any numeric variant.
#[derive(Clone, Copy, Debug)]
enum Number {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

fn number(value: &ConfigValue) -> Option<Number> {
    match value {
        ConfigValue::I8(v) => Some(Number::Signed(i64::from(*v))),
        ConfigValue::I16(v) => Some(Number::Signed(i64::from(*v))),
        ConfigValue::I32(v) => Some(Number::Signed(i64::from(*v))),
        ConfigValue::I64(v) => Some(Number::Signed(*v)),
        ConfigValue::U8(v) => Some(Number::Unsigned(u64::from(*v))),
        ConfigValue::U16(v) => Some(Number::Unsigned(u64::from(*v))),
        ConfigValue::U32(v) => Some(Number::Unsigned(u64::from(*v))),
        ConfigValue::U64(v) => Some(Number::Unsigned(*v)),
        ConfigValue::Float(v) => Some(Number::Float(*v)),
        _ => None,
    }
}

/// Parses the canonical boolean grammar: `true`, `t`, `1` and `false`, `f`, `0`,
/// ignoring ASCII case.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

/// Parses a duration literal (`"30s"`, `"1h30m"`, `"300ms"`), falling back to a plain
/// integer count of nanoseconds. Anything else yields `Duration::ZERO`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use treecfg::domain::coerce::parse_duration;
///
/// assert_eq!(parse_duration("1h30m"), Duration::from_secs(5400));
/// assert_eq!(parse_duration("60"), Duration::from_nanos(60));
/// assert_eq!(parse_duration("soon"), Duration::ZERO);
/// ```
pub fn parse_duration(s: &str) -> Duration {
    if let Ok(duration) = humantime::parse_duration(s) {
        return duration;
    }
    s.parse::<i64>().map(nanos_to_duration).unwrap_or_default()
}

fn nanos_to_duration(nanos: i64) -> Duration {
    u64::try_from(nanos)
        .map(Duration::from_nanos)
        .unwrap_or_default()
}

/// Converts a value to its textual form.
pub fn to_string(value: &ConfigValue) -> String {
    match value {
        ConfigValue::String(s) => s.clone(),
        ConfigValue::Bool(v) => v.to_string(),
        ConfigValue::Float(v) => v.to_string(),
        ConfigValue::Duration(v) => humantime::format_duration(*v).to_string(),
        other => match number(other) {
            Some(Number::Signed(v)) => v.to_string(),
            Some(Number::Unsigned(v)) => v.to_string(),
            Some(Number::Float(v)) => v.to_string(),
            None => String::new(),
        },
    }
}

/// Converts a value to a boolean. Numbers are `true` when nonzero.
pub fn to_bool(value: &ConfigValue) -> bool {
    match value {
        ConfigValue::Bool(v) => *v,
        ConfigValue::String(s) => parse_bool(s).unwrap_or_default(),
        other => match number(other) {
            Some(Number::Signed(v)) => v != 0,
            Some(Number::Unsigned(v)) => v != 0,
            Some(Number::Float(v)) => v != 0.0,
            None => false,
        },
    }
}

macro_rules! integer_coercion {
    ($($(#[$doc:meta])* $name:ident => $ty:ty;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(value: &ConfigValue) -> $ty {
                match value {
                    ConfigValue::String(s) => s.parse::<$ty>().unwrap_or_default(),
                    other => match number(other) {
                        Some(Number::Signed(v)) => v as $ty,
                        Some(Number::Unsigned(v)) => v as $ty,
                        Some(Number::Float(v)) => v as $ty,
                        None => 0,
                    },
                }
            }
        )*
    };
}

integer_coercion! {
    /// Converts a value to an `i8`, truncating wider numbers.
    to_i8 => i8;
    /// Converts a value to an `i16`, truncating wider numbers.
    to_i16 => i16;
    /// Converts a value to an `i32`, truncating wider numbers.
    to_i32 => i32;
    /// Converts a value to an `i64`.
    to_i64 => i64;
    /// Converts a value to a `u8`, truncating wider numbers.
    to_u8 => u8;
    /// Converts a value to a `u16`, truncating wider numbers.
    to_u16 => u16;
    /// Converts a value to a `u32`, truncating wider numbers.
    to_u32 => u32;
    /// Converts a value to a `u64`.
    to_u64 => u64;
}

/// Converts a value to an `f64`.
pub fn to_f64(value: &ConfigValue) -> f64 {
    match value {
        ConfigValue::String(s) => s.parse::<f64>().unwrap_or_default(),
        other => match number(other) {
            Some(Number::Signed(v)) => v as f64,
            Some(Number::Unsigned(v)) => v as f64,
            Some(Number::Float(v)) => v,
            None => 0.0,
        },
    }
}

/// Converts a value to a `Duration`. Numbers count nanoseconds.
pub fn to_duration(value: &ConfigValue) -> Duration {
    match value {
        ConfigValue::Duration(v) => *v,
        ConfigValue::String(s) => parse_duration(s),
        other => match number(other) {
            Some(Number::Signed(v)) => nanos_to_duration(v),
            Some(Number::Unsigned(v)) => Duration::from_nanos(v),
            Some(Number::Float(v)) if v.is_finite() && v > 0.0 => Duration::from_nanos(v as u64),
            _ => Duration::ZERO,
        },
    }
}

/// Converts a value to a string sequence.
///
/// Returns `None` (not an empty vector) for non-sequence input and for an integer
/// sequence, so callers can tell a missing or mistyped key from an empty list.
pub fn to_string_seq(value: &ConfigValue) -> Option<Vec<String>> {
    match value {
        ConfigValue::StringSeq(items) => Some(items.clone()),
        ConfigValue::Seq(items) => Some(items.iter().map(to_string).collect()),
        _ => None,
    }
}

/// Converts a value to an integer sequence.
///
/// Elements of a generic sequence that are not integers become `0`. A string sequence
/// yields `None`.
pub fn to_int_seq(value: &ConfigValue) -> Option<Vec<i64>> {
    match value {
        ConfigValue::IntSeq(items) => Some(items.clone()),
        ConfigValue::Seq(items) => Some(items.iter().map(to_i64).collect()),
        _ => None,
    }
}

/// Converts a value to a mapping. Non-mappings yield an empty map, never `None`.
pub fn to_map(value: &ConfigValue) -> ConfigTree {
    match value {
        ConfigValue::Map(map) => map.clone(),
        _ => ConfigTree::new(),
    }
}

/// Splits comma-separated text, trimming each piece and dropping empty ones.
///
/// # Examples
///
/// ```
/// use treecfg::domain::coerce::split_trim;
///
/// assert_eq!(split_trim("a, ,b,,c"), vec!["a", "b", "c"]);
/// assert!(split_trim("   ").is_empty());
/// ```
pub fn split_trim(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits comma-separated text into integers, dropping empty pieces and pieces that
/// are not base-10 integers.
pub fn split_trim_ints(s: &str) -> Vec<i64> {
    s.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .filter_map(|piece| piece.parse::<i64>().ok())
        .collect()
}

/// Target types of a configuration lookup.
///
/// `coerce` converts a stored value; `from_override` converts the raw text of an
/// environment override. The default `from_override` coerces the text as a string
/// value; sequences parse it as a comma-separated list instead.
///
/// `Default::default()` is the zero value returned for missing keys.
pub trait Coerce: Default + Sized {
    /// Converts a stored configuration value.
    fn coerce(value: &ConfigValue) -> Self;

    /// Converts the raw text of an environment override.
    fn from_override(raw: &str) -> Self {
        Self::coerce(&ConfigValue::String(raw.to_string()))
    }
}

macro_rules! coerce_via {
    ($($ty:ty => $func:ident;)*) => {
        $(
            impl Coerce for $ty {
                fn coerce(value: &ConfigValue) -> Self {
                    $func(value)
                }
            }
        )*
    };
}

coerce_via! {
    bool => to_bool;
    i8 => to_i8;
    i16 => to_i16;
    i32 => to_i32;
    i64 => to_i64;
    u8 => to_u8;
    u16 => to_u16;
    u32 => to_u32;
    u64 => to_u64;
    f64 => to_f64;
    Duration => to_duration;
    ConfigTree => to_map;
}

impl Coerce for String {
    fn coerce(value: &ConfigValue) -> Self {
        to_string(value)
    }

    fn from_override(raw: &str) -> Self {
        raw.to_string()
    }
}

impl Coerce for Option<Vec<String>> {
    fn coerce(value: &ConfigValue) -> Self {
        to_string_seq(value)
    }

    fn from_override(raw: &str) -> Self {
        Some(split_trim(raw))
    }
}

impl Coerce for Option<Vec<i64>> {
    fn coerce(value: &ConfigValue) -> Self {
        to_int_seq(value)
    }

    fn from_override(raw: &str) -> Self {
        Some(split_trim_ints(raw))
    }
}

impl Coerce for ConfigValue {
    fn coerce(value: &ConfigValue) -> Self {
        value.clone()
    }

    fn from_override(raw: &str) -> Self {
        ConfigValue::String(raw.to_string())
    }
}
