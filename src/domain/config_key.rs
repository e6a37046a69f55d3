// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dotted configuration keys.
//!
//! This module provides the `DottedKey` type, a newtype wrapper around `String` that
//! addresses a node of the configuration tree (`"database.connection.host"`), derives the
//! environment variable name that overrides it, and walks or writes the tree.

use crate::domain::config_value::{ConfigTree, ConfigValue};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Separator between key segments.
pub const KEY_SEPARATOR: char = '.';

/// A type-safe wrapper for dotted configuration keys.
///
/// `DottedKey` keeps the raw key text. Segments are derived by splitting on `.`; a key
/// containing an empty segment (including the empty key itself) never resolves and is
/// never written.
///
/// # Examples
///
/// ```
/// use treecfg::domain::DottedKey;
///
/// let key = DottedKey::from("database.host");
/// assert_eq!(key.segments().collect::<Vec<_>>(), vec!["database", "host"]);
/// assert_eq!(key.env_name(), "DATABASE_HOST");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DottedKey(String);

impl DottedKey {
    /// Creates a new `DottedKey` from a `String`.
    pub fn new(key: String) -> Self {
        DottedKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `DottedKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns an iterator over the key's segments.
    ///
    /// Splitting the empty key yields a single empty segment.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(KEY_SEPARATOR)
    }

    /// Returns `true` if every segment is non-empty.
    pub fn is_valid(&self) -> bool {
        self.segments().all(|segment| !segment.is_empty())
    }

    /// Returns a new key with `segment` appended.
    ///
    /// Appending to the empty key yields `segment` alone, which is how tree walks build
    /// the fully-qualified key of each child.
    ///
    /// # Examples
    ///
    /// ```
    /// use treecfg::domain::DottedKey;
    ///
    /// let root = DottedKey::from("");
    /// let child = root.child("app").child("name");
    /// assert_eq!(child.as_str(), "app.name");
    /// ```
    pub fn child(&self, segment: &str) -> DottedKey {
        if self.0.is_empty() {
            DottedKey(segment.to_string())
        } else {
            DottedKey(format!("{}{}{}", self.0, KEY_SEPARATOR, segment))
        }
    }

    /// Derives the environment variable name overriding this key.
    ///
    /// Segments are joined with `_` and upper-cased. No escaping is applied, so
    /// `a.b_c` and `a.b.c` both map to `A_B_C`.
    pub fn env_name(&self) -> String {
        self.0.replace(KEY_SEPARATOR, "_").to_uppercase()
    }

    /// Walks `tree` along this key.
    ///
    /// Returns `None` as soon as a segment is missing or an intermediate node is not a
    /// mapping.
    pub fn resolve<'a>(&self, tree: &'a ConfigTree) -> Option<&'a ConfigValue> {
        if !self.is_valid() {
            return None;
        }

        let mut segments = self.segments();
        let mut current = tree.get(segments.next()?)?;
        for segment in segments {
            current = current.as_map()?.get(segment)?;
        }
        Some(current)
    }

    /// Writes `value` into `tree` at this key.
    ///
    /// Missing intermediate mappings are created. An intermediate node holding a
    /// non-mapping value is replaced by an empty mapping, discarding the old value.
    /// Returns `false` without touching the tree if the key has an empty segment.
    pub fn assign(&self, tree: &mut ConfigTree, value: ConfigValue) -> bool {
        if !self.is_valid() {
            return false;
        }

        let segments: Vec<&str> = self.segments().collect();
        let (last, parents) = match segments.split_last() {
            Some(split) => split,
            None => return false,
        };

        let mut current = tree;
        for segment in parents {
            let node = current
                .entry((*segment).to_string())
                .or_insert_with(|| ConfigValue::Map(ConfigTree::new()));
            if !node.is_map() {
                *node = ConfigValue::Map(ConfigTree::new());
            }
            current = match node {
                ConfigValue::Map(map) => map,
                _ => return false,
            };
        }

        current.insert((*last).to_string(), value);
        true
    }
}

impl From<String> for DottedKey {
    fn from(s: String) -> Self {
        DottedKey(s)
    }
}

impl From<&str> for DottedKey {
    fn from(s: &str) -> Self {
        DottedKey(s.to_string())
    }
}

impl From<DottedKey> for String {
    fn from(key: DottedKey) -> Self {
        key.0
    }
}

impl AsRef<str> for DottedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DottedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Hash for DottedKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
