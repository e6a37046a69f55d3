// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable override source adapter.
//!
//! This module provides the adapter that answers override lookups from the process
//! environment.

use crate::ports::OverrideSource;
use std::collections::HashMap;
use std::env;

/// Override source backed by environment variables.
///
/// The adapter is stateless: every lookup reads the environment, so variables set after
/// startup (or by an applied `.env` file) are picked up by the next getter call.
///
/// An optional prefix is prepended to every looked-up name, so that with the prefix
/// `MYAPP_` the key `db.host` is overridden by `MYAPP_DB_HOST`.
///
/// # Examples
///
/// ```rust
/// use treecfg::adapters::EnvVarAdapter;
/// use treecfg::ports::OverrideSource;
///
/// // Read unprefixed variables
/// let adapter = EnvVarAdapter::new();
/// assert_eq!(adapter.name(), "env");
///
/// // Read only variables with a specific prefix
/// let adapter = EnvVarAdapter::with_prefix("MYAPP_");
/// assert_eq!(adapter.prefix(), Some("MYAPP_"));
/// ```
#[derive(Debug, Default)]
pub struct EnvVarAdapter {
    /// Optional prefix prepended to every variable name
    prefix: Option<String>,
    /// Fixed values used instead of the process environment
    values: Option<HashMap<String, String>>,
}

impl EnvVarAdapter {
    /// Creates an adapter reading unprefixed process environment variables.
    pub fn new() -> Self {
        Self {
            prefix: None,
            values: None,
        }
    }

    /// Creates an adapter that prepends `prefix` to every variable name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treecfg::adapters::EnvVarAdapter;
    ///
    /// let adapter = EnvVarAdapter::with_prefix("MYAPP_");
    /// assert_eq!(adapter.variable_name("DB_HOST"), "MYAPP_DB_HOST");
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            values: None,
        }
    }

    /// Creates an adapter with pre-populated values for testing.
    ///
    /// **Note**: This method is primarily intended for testing and should not
    /// be used in production code. The process environment is never consulted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treecfg::adapters::EnvVarAdapter;
    /// use treecfg::ports::OverrideSource;
    /// use std::collections::HashMap;
    ///
    /// let mut values = HashMap::new();
    /// values.insert("APP_PORT".to_string(), "9090".to_string());
    ///
    /// let adapter = EnvVarAdapter::with_values(values);
    /// assert_eq!(adapter.lookup("APP_PORT"), Some("9090".to_string()));
    /// ```
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            prefix: None,
            values: Some(values),
        }
    }

    /// Returns the configured prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Returns the full variable name for an override name, with the prefix applied.
    pub fn variable_name(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, name),
            None => name.to_string(),
        }
    }
}

impl OverrideSource for EnvVarAdapter {
    fn name(&self) -> &str {
        "env"
    }

    fn lookup(&self, name: &str) -> Option<String> {
        let variable = self.variable_name(name);
        match &self.values {
            Some(values) => values.get(&variable).cloned(),
            None => env::var_os(&variable).map(|value| value.to_string_lossy().into_owned()),
        }
    }
}
