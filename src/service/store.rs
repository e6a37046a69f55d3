// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lock-guarded configuration tree.
//!
//! The store owns one [`ConfigTree`] behind a `RwLock`. Reads take the read lock for the
//! duration of the walk and return copies; `set`, `reset` and `load` take the write lock.
//! A poisoned lock is recovered rather than propagated, since every write leaves the
//! tree in a consistent state before the guard is dropped.

use crate::domain::{ConfigTree, ConfigValue, DottedKey};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The in-memory configuration tree.
///
/// # Examples
///
/// ```rust
/// use treecfg::service::Store;
/// use treecfg::domain::ConfigValue;
///
/// let store = Store::new();
/// store.set("server.port", 8080_i64);
/// assert_eq!(store.get("server.port"), Some(ConfigValue::I64(8080)));
/// assert!(store.contains("server"));
///
/// store.reset();
/// assert!(!store.contains("server.port"));
/// ```
#[derive(Debug, Default)]
pub struct Store {
    tree: RwLock<ConfigTree>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `tree`.
    pub fn from_tree(tree: ConfigTree) -> Self {
        Self {
            tree: RwLock::new(tree),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ConfigTree> {
        self.tree.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ConfigTree> {
        self.tree.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the value at `key`, or `None` if it does not resolve.
    pub fn get(&self, key: impl Into<DottedKey>) -> Option<ConfigValue> {
        let key = key.into();
        key.resolve(&self.read()).cloned()
    }

    /// Returns `true` if `key` resolves in the tree.
    pub fn contains(&self, key: impl Into<DottedKey>) -> bool {
        let key = key.into();
        key.resolve(&self.read()).is_some()
    }

    /// Writes `value` at `key`, creating intermediate mappings.
    ///
    /// A non-mapping value on the path is replaced by an empty mapping. A key with an
    /// empty segment is ignored with a warning.
    pub fn set(&self, key: impl Into<DottedKey>, value: impl Into<ConfigValue>) {
        let key = key.into();
        let value = value.into();
        let type_name = value.type_name();

        if key.assign(&mut self.write(), value) {
            tracing::debug!("Set configuration key '{}' ({})", key, type_name);
        } else {
            tracing::warn!("Ignoring set of invalid configuration key '{}'", key);
        }
    }

    /// Removes every key.
    pub fn reset(&self) {
        self.write().clear();
        tracing::debug!("Configuration store reset");
    }

    /// Replaces the whole tree.
    pub fn load(&self, tree: ConfigTree) {
        let keys = tree.len();
        *self.write() = tree;
        tracing::debug!("Configuration store loaded ({} top-level keys)", keys);
    }

    /// Returns a deep copy of the tree.
    pub fn snapshot(&self) -> ConfigTree {
        self.read().clone()
    }
}
