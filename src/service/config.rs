// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration handle.
//!
//! [`Config`] combines a [`Store`] with an [`EnvBridge`] and exposes typed lookups.
//! Every lookup resolves in the same order:
//!
//! 1. the environment variable derived from the key (`http.port` -> `HTTP_PORT`),
//! 2. the value in the tree, with overrides applied inside mappings,
//! 3. the zero value of the requested type.
//!
//! Lookups never fail; see [`crate::domain::coerce`] for the conversion rules.

use crate::adapters::EnvVarAdapter;
use crate::domain::{Coerce, ConfigTree, ConfigValue, DottedKey};
use crate::ports::OverrideSource;
use crate::service::builder::ConfigBuilder;
use crate::service::env_bridge::EnvBridge;
use crate::service::store::Store;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "yaml")]
use crate::adapters::YamlParser;
#[cfg(feature = "yaml")]
use crate::domain::Result;
#[cfg(feature = "yaml")]
use serde::de::DeserializeOwned;

/// A configuration tree with environment overrides.
///
/// `Config` is `Send + Sync`; share it by reference or inside an `Arc`. The crate also
/// keeps one process-wide instance, see [`crate::global`].
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use std::time::Duration;
/// use treecfg::adapters::EnvVarAdapter;
/// use treecfg::service::Config;
///
/// let mut env = HashMap::new();
/// env.insert("HTTP_PORT".to_string(), "3000".to_string());
///
/// let config = Config::with_overrides(Arc::new(EnvVarAdapter::with_values(env)));
/// config.set("http.port", 8080_i64);
/// config.set("http.timeout", Duration::from_secs(30));
///
/// assert_eq!(config.get_i32("http.port"), 3000);
/// assert_eq!(config.get_duration("http.timeout"), Duration::from_secs(30));
/// assert_eq!(config.get_string_or("http.host", "0.0.0.0"), "0.0.0.0");
/// ```
#[derive(Debug)]
pub struct Config {
    store: Store,
    bridge: EnvBridge,
}

macro_rules! typed_getters {
    ($($get:ident, $get_or:ident => $ty:ty, $zero:literal;)*) => {
        $(
            #[doc = concat!("Returns the value at `key` as `", stringify!($ty), "`, or `", $zero, "` if it is not set.")]
            pub fn $get(&self, key: &str) -> $ty {
                self.get::<$ty>(key)
            }

            #[doc = concat!("Returns the value at `key` as `", stringify!($ty), "`, or `default` if it is not set.")]
            pub fn $get_or(&self, key: &str, default: $ty) -> $ty {
                self.get_or::<$ty>(key, default)
            }
        )*
    };
}

impl Config {
    /// Creates an empty configuration reading overrides from the process environment.
    pub fn new() -> Self {
        Self::with_overrides(Arc::new(EnvVarAdapter::new()))
    }

    /// Creates an empty configuration reading overrides from `source`.
    pub fn with_overrides(source: Arc<dyn OverrideSource>) -> Self {
        Self {
            store: Store::new(),
            bridge: EnvBridge::new(source),
        }
    }

    /// Creates a configuration holding `tree`, with process environment overrides.
    pub fn from_tree(tree: ConfigTree) -> Self {
        let config = Self::new();
        config.load(tree);
        config
    }

    /// Returns a builder that locates and loads a configuration document.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the override bridge.
    pub fn bridge(&self) -> &EnvBridge {
        &self.bridge
    }

    fn resolve(&self, key: &DottedKey) -> Option<ConfigValue> {
        self.store
            .get(key.clone())
            .map(|value| self.bridge.overlay(key, value))
    }

    // One override lookup and one tree read, so a concurrent reset cannot split them.
    fn lookup<T: Coerce>(&self, key: &DottedKey) -> Option<T> {
        match self.bridge.lookup_override(key) {
            Some(raw) => Some(T::from_override(&raw)),
            None => self.resolve(key).map(|value| T::coerce(&value)),
        }
    }

    /// Reports whether `key` has an environment override or resolves in the tree.
    pub fn is_set(&self, key: &str) -> bool {
        let key = DottedKey::from(key);
        self.bridge.lookup_override(&key).is_some() || self.store.contains(key)
    }

    /// Returns the value at `key` converted to `T`, or `T::default()` if it is not set.
    ///
    /// An environment override is converted from its raw text; sequences read it as
    /// a comma-separated list.
    pub fn get<T: Coerce>(&self, key: &str) -> T {
        self.lookup(&DottedKey::from(key)).unwrap_or_default()
    }

    /// Returns [`Config::get`] if `key` is set, otherwise `default`.
    ///
    /// A key that is set to an unconvertible value yields the zero value, not
    /// `default`.
    pub fn get_or<T: Coerce>(&self, key: &str, default: T) -> T {
        self.lookup(&DottedKey::from(key)).unwrap_or(default)
    }

    /// Returns the value at `key` as a string, or `""` if it is not set.
    pub fn get_string(&self, key: &str) -> String {
        self.get::<String>(key)
    }

    /// Returns the value at `key` as a string, or `default` if it is not set.
    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_or::<String>(key, default.to_string())
    }

    /// Returns the value at `key` as a string, or `None` if it is not set.
    pub fn get_optional_string(&self, key: &str) -> Option<String> {
        self.lookup(&DottedKey::from(key))
    }

    typed_getters! {
        get_bool, get_bool_or => bool, "false";
        get_i8, get_i8_or => i8, "0";
        get_i16, get_i16_or => i16, "0";
        get_i32, get_i32_or => i32, "0";
        get_i64, get_i64_or => i64, "0";
        get_u8, get_u8_or => u8, "0";
        get_u16, get_u16_or => u16, "0";
        get_u32, get_u32_or => u32, "0";
        get_u64, get_u64_or => u64, "0";
        get_f64, get_f64_or => f64, "0.0";
        get_duration, get_duration_or => Duration, "Duration::ZERO";
    }

    /// Returns the sequence at `key` as strings.
    ///
    /// `None` means the key is not set or does not hold a sequence. An override is
    /// split on commas, with pieces trimmed and empty ones dropped.
    pub fn get_string_slice(&self, key: &str) -> Option<Vec<String>> {
        self.get::<Option<Vec<String>>>(key)
    }

    /// Returns [`Config::get_string_slice`], or `default` when it is `None`.
    pub fn get_string_slice_or(&self, key: &str, default: Vec<String>) -> Vec<String> {
        self.get_string_slice(key).unwrap_or(default)
    }

    /// Returns the sequence at `key` as integers.
    ///
    /// Override pieces that are not integers are dropped.
    pub fn get_int_slice(&self, key: &str) -> Option<Vec<i64>> {
        self.get::<Option<Vec<i64>>>(key)
    }

    /// Returns [`Config::get_int_slice`], or `default` when it is `None`.
    pub fn get_int_slice_or(&self, key: &str, default: Vec<i64>) -> Vec<i64> {
        self.get_int_slice(key).unwrap_or(default)
    }

    /// Returns the mapping at `key` with overrides applied to its leaves.
    ///
    /// Anything other than a mapping yields an empty map. The mapping itself cannot be
    /// overridden, only its leaves.
    pub fn get_map(&self, key: &str) -> ConfigTree {
        self.resolve(&DottedKey::from(key))
            .map(|value| ConfigTree::coerce(&value))
            .unwrap_or_default()
    }

    /// Returns the mapping at `key`, or `default` if the key does not hold a mapping.
    pub fn get_map_or(&self, key: &str, default: ConfigTree) -> ConfigTree {
        match self.resolve(&DottedKey::from(key)) {
            Some(ConfigValue::Map(map)) => map,
            _ => default,
        }
    }

    /// Returns a deep copy of the whole tree with overrides applied.
    pub fn all_settings(&self) -> ConfigTree {
        self.bridge
            .apply_overrides(&self.store.snapshot(), &DottedKey::from(""))
    }

    /// Decodes the whole tree, with overrides applied, into `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde::Deserialize;
    /// use treecfg::service::Config;
    ///
    /// #[derive(Deserialize)]
    /// struct Worker {
    ///     threads: u32,
    /// }
    ///
    /// #[derive(Deserialize)]
    /// struct Settings {
    ///     treecfgdoc: Worker,
    /// }
    ///
    /// let config = Config::new();
    /// config.set("treecfgdoc.threads", 4_i64);
    /// let settings: Settings = config.decode().unwrap();
    /// assert_eq!(settings.treecfgdoc.threads, 4);
    /// ```
    #[cfg(feature = "yaml")]
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        YamlParser::decode("", &ConfigValue::Map(self.all_settings()))
    }

    /// Decodes the value at `key`, with overrides applied, into `T`.
    ///
    /// Returns `Ok(None)` when `key` does not resolve in the tree.
    #[cfg(feature = "yaml")]
    pub fn decode_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.resolve(&DottedKey::from(key)) {
            Some(value) => YamlParser::decode(key, &value).map(Some),
            None => Ok(None),
        }
    }

    /// Writes `value` at `key`. See [`Store::set`].
    pub fn set(&self, key: &str, value: impl Into<ConfigValue>) {
        self.store.set(key, value);
    }

    /// Removes every key from the tree. The environment is untouched.
    pub fn reset(&self) {
        self.store.reset();
    }

    /// Replaces the tree.
    pub fn load(&self, tree: ConfigTree) {
        self.store.load(tree);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
