// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for integration tests.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};
use tempfile::TempDir;
use treecfg::ports::OverrideSource;

/// Helper to set and clean up environment variables
#[allow(dead_code)]
pub struct EnvGuard {
    keys: Vec<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    pub fn new() -> Self {
        EnvGuard { keys: Vec::new() }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        env::set_var(key, value);
        self.keys.push(key.to_string());
    }

    /// Registers a variable set by someone else (for example a `.env` file) for cleanup.
    pub fn track(&mut self, key: &str) {
        self.keys.push(key.to_string());
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

/// Creates a temporary directory holding the given files.
#[allow(dead_code)]
pub fn temp_dir_with(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        let path: PathBuf = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }
    dir
}

static GLOBAL_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that touch the process-wide configuration.
#[allow(dead_code)]
pub fn global_lock() -> MutexGuard<'static, ()> {
    GLOBAL_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An override source whose values can change while it is in use.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct MockOverrideSource {
    values: RwLock<HashMap<String, String>>,
}

#[allow(dead_code)]
impl MockOverrideSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, name: &str, value: &str) -> Self {
        self.update(name, value);
        self
    }

    pub fn update(&self, name: &str, value: &str) {
        self.values
            .write()
            .unwrap()
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove(&self, name: &str) {
        self.values.write().unwrap().remove(name);
    }
}

impl OverrideSource for MockOverrideSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn lookup(&self, name: &str) -> Option<String> {
        self.values.read().unwrap().get(name).cloned()
    }
}
