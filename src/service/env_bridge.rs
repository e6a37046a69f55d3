// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment override resolution.
//!
//! The bridge maps dotted keys to environment names, fetches override text from an
//! [`OverrideSource`] and converts it into the shape of the tree value it replaces, so a
//! port stored as an integer stays an integer after being overridden.

use crate::domain::coerce::{self, split_trim, split_trim_ints};
use crate::domain::{ConfigTree, ConfigValue, DottedKey};
use crate::ports::OverrideSource;
use std::fmt;
use std::sync::Arc;

/// Resolves environment overrides for configuration keys.
///
/// Nothing is cached; every call consults the source.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use treecfg::adapters::EnvVarAdapter;
/// use treecfg::domain::{ConfigValue, DottedKey};
/// use treecfg::service::EnvBridge;
///
/// let mut values = HashMap::new();
/// values.insert("SERVER_PORT".to_string(), "9090".to_string());
/// let bridge = EnvBridge::new(Arc::new(EnvVarAdapter::with_values(values)));
///
/// let key = DottedKey::from("server.port");
/// assert_eq!(bridge.override_name(&key), "SERVER_PORT");
/// assert_eq!(bridge.overlay(&key, ConfigValue::I64(8080)), ConfigValue::I64(9090));
/// ```
#[derive(Clone)]
pub struct EnvBridge {
    source: Arc<dyn OverrideSource>,
}

impl EnvBridge {
    /// Creates a bridge over `source`.
    pub fn new(source: Arc<dyn OverrideSource>) -> Self {
        Self { source }
    }

    /// Returns the environment name overriding `key`.
    pub fn override_name(&self, key: &DottedKey) -> String {
        key.env_name()
    }

    /// Returns the raw override text for `key`, if the variable is set.
    pub fn lookup_override(&self, key: &DottedKey) -> Option<String> {
        self.source.lookup(&self.override_name(key))
    }

    /// Converts raw override text into the variant of `original`.
    ///
    /// Scalars are coerced into the same variant, so `"42abc"` overriding an integer
    /// becomes `0`. Typed sequences are parsed as comma-separated lists; a generic
    /// sequence becomes an integer list when its first element is numeric, and a string
    /// list otherwise. Strings, nulls and mappings take the text as-is.
    pub fn convert_override(raw: &str, original: &ConfigValue) -> ConfigValue {
        let text = ConfigValue::String(raw.to_string());
        match original {
            ConfigValue::Bool(_) => ConfigValue::Bool(coerce::to_bool(&text)),
            ConfigValue::I8(_) => ConfigValue::I8(coerce::to_i8(&text)),
            ConfigValue::I16(_) => ConfigValue::I16(coerce::to_i16(&text)),
            ConfigValue::I32(_) => ConfigValue::I32(coerce::to_i32(&text)),
            ConfigValue::I64(_) => ConfigValue::I64(coerce::to_i64(&text)),
            ConfigValue::U8(_) => ConfigValue::U8(coerce::to_u8(&text)),
            ConfigValue::U16(_) => ConfigValue::U16(coerce::to_u16(&text)),
            ConfigValue::U32(_) => ConfigValue::U32(coerce::to_u32(&text)),
            ConfigValue::U64(_) => ConfigValue::U64(coerce::to_u64(&text)),
            ConfigValue::Float(_) => ConfigValue::Float(coerce::to_f64(&text)),
            ConfigValue::Duration(_) => ConfigValue::Duration(coerce::to_duration(&text)),
            ConfigValue::StringSeq(_) => ConfigValue::StringSeq(split_trim(raw)),
            ConfigValue::IntSeq(_) => ConfigValue::IntSeq(split_trim_ints(raw)),
            ConfigValue::Seq(items) => match items.first() {
                Some(first) if first.is_numeric() => ConfigValue::IntSeq(split_trim_ints(raw)),
                _ => ConfigValue::StringSeq(split_trim(raw)),
            },
            ConfigValue::String(_) | ConfigValue::Null | ConfigValue::Map(_) => text,
        }
    }

    /// Applies overrides to a value found at `key`.
    ///
    /// Mappings are rebuilt with every leaf overlaid; a leaf is replaced by its
    /// converted override when one exists.
    pub fn overlay(&self, key: &DottedKey, value: ConfigValue) -> ConfigValue {
        match value {
            ConfigValue::Map(tree) => ConfigValue::Map(self.apply_overrides(&tree, key)),
            leaf => match self.lookup_override(key) {
                Some(raw) => {
                    tracing::trace!(
                        "Override {} applied to '{}'",
                        self.override_name(key),
                        key
                    );
                    Self::convert_override(&raw, &leaf)
                }
                None => leaf,
            },
        }
    }

    /// Returns a copy of `tree` with overrides applied to every leaf.
    ///
    /// `prefix` is the dotted key of `tree` itself; pass the empty key for the root.
    pub fn apply_overrides(&self, tree: &ConfigTree, prefix: &DottedKey) -> ConfigTree {
        tree.iter()
            .map(|(name, value)| {
                let key = prefix.child(name);
                (name.clone(), self.overlay(&key, value.clone()))
            })
            .collect()
    }
}

impl fmt::Debug for EnvBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvBridge")
            .field("source", &self.source.name())
            .finish()
    }
}
