// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide configuration.
//!
//! One [`Config`] is created lazily on first use and lives for the rest of the process.
//! It reads overrides from the process environment. Every accessor of [`Config`] has a
//! free-function counterpart here, so applications can call
//! `treecfg::get_string("app.name")` without passing a handle around.
//!
//! ```rust,no_run
//! # fn main() -> treecfg::domain::Result<()> {
//! treecfg::init()?;
//!
//! let port = treecfg::get_u16_or("http.port", 8080);
//! let origins = treecfg::get_string_slice("cors.allowed_origins").unwrap_or_default();
//! # Ok(())
//! # }
//! ```
//!
//! Code that needs isolation (tests, several configurations in one process) should
//! create its own [`Config`] instead.

use crate::domain::{Coerce, ConfigTree, ConfigValue};
use crate::service::Config;
use once_cell::sync::Lazy;
use std::time::Duration;

#[cfg(feature = "yaml")]
use crate::domain::Result;
#[cfg(feature = "yaml")]
use crate::service::ConfigBuilder;
#[cfg(feature = "yaml")]
use serde::de::DeserializeOwned;

static GLOBAL: Lazy<Config> = Lazy::new(Config::new);

/// Returns the process-wide configuration.
pub fn global() -> &'static Config {
    &GLOBAL
}

/// Loads `config.yaml` (and the `.env` next to it) into the global configuration.
///
/// The document is searched for in the current directory and its parents. Any tree
/// loaded before is replaced.
#[cfg(feature = "yaml")]
pub fn init() -> Result<()> {
    init_with(ConfigBuilder::new())
}

/// Loads the document located by `builder` into the global configuration.
///
/// The global configuration always reads overrides from the process environment; an
/// override source set on the builder is not used here.
#[cfg(feature = "yaml")]
pub fn init_with(builder: ConfigBuilder) -> Result<()> {
    let tree = builder.load_tree()?;
    global().load(tree);
    Ok(())
}

/// Reports whether `key` is set in the global configuration. See [`Config::is_set`].
pub fn is_set(key: &str) -> bool {
    global().is_set(key)
}

/// See [`Config::get`].
pub fn get<T: Coerce>(key: &str) -> T {
    global().get(key)
}

/// See [`Config::get_or`].
pub fn get_or<T: Coerce>(key: &str, default: T) -> T {
    global().get_or(key, default)
}

/// See [`Config::get_string`].
pub fn get_string(key: &str) -> String {
    global().get_string(key)
}

/// See [`Config::get_string_or`].
pub fn get_string_or(key: &str, default: &str) -> String {
    global().get_string_or(key, default)
}

/// See [`Config::get_optional_string`].
pub fn get_optional_string(key: &str) -> Option<String> {
    global().get_optional_string(key)
}

macro_rules! global_getters {
    ($($get:ident, $get_or:ident => $ty:ty;)*) => {
        $(
            #[doc = concat!("See [`Config::", stringify!($get), "`].")]
            pub fn $get(key: &str) -> $ty {
                global().$get(key)
            }

            #[doc = concat!("See [`Config::", stringify!($get_or), "`].")]
            pub fn $get_or(key: &str, default: $ty) -> $ty {
                global().$get_or(key, default)
            }
        )*
    };
}

global_getters! {
    get_bool, get_bool_or => bool;
    get_i8, get_i8_or => i8;
    get_i16, get_i16_or => i16;
    get_i32, get_i32_or => i32;
    get_i64, get_i64_or => i64;
    get_u8, get_u8_or => u8;
    get_u16, get_u16_or => u16;
    get_u32, get_u32_or => u32;
    get_u64, get_u64_or => u64;
    get_f64, get_f64_or => f64;
    get_duration, get_duration_or => Duration;
}

/// See [`Config::get_string_slice`].
pub fn get_string_slice(key: &str) -> Option<Vec<String>> {
    global().get_string_slice(key)
}

/// See [`Config::get_string_slice_or`].
pub fn get_string_slice_or(key: &str, default: Vec<String>) -> Vec<String> {
    global().get_string_slice_or(key, default)
}

/// See [`Config::get_int_slice`].
pub fn get_int_slice(key: &str) -> Option<Vec<i64>> {
    global().get_int_slice(key)
}

/// See [`Config::get_int_slice_or`].
pub fn get_int_slice_or(key: &str, default: Vec<i64>) -> Vec<i64> {
    global().get_int_slice_or(key, default)
}

/// See [`Config::get_map`].
pub fn get_map(key: &str) -> ConfigTree {
    global().get_map(key)
}

/// See [`Config::get_map_or`].
pub fn get_map_or(key: &str, default: ConfigTree) -> ConfigTree {
    global().get_map_or(key, default)
}

/// See [`Config::all_settings`].
pub fn all_settings() -> ConfigTree {
    global().all_settings()
}

/// See [`Config::decode`].
#[cfg(feature = "yaml")]
pub fn decode<T: DeserializeOwned>() -> Result<T> {
    global().decode()
}

/// See [`Config::decode_key`].
#[cfg(feature = "yaml")]
pub fn decode_key<T: DeserializeOwned>(key: &str) -> Result<Option<T>> {
    global().decode_key(key)
}

/// Writes `value` at `key` in the global configuration.
pub fn set(key: &str, value: impl Into<ConfigValue>) {
    global().set(key, value)
}

/// Empties the global configuration tree. The environment is untouched.
pub fn reset() {
    global().reset()
}

/// Replaces the global configuration tree.
pub fn load(tree: ConfigTree) {
    global().load(tree)
}
