// SPDX-License-Identifier: MIT OR Apache-2.0

//! Override source trait definition.
//!
//! An override source answers one question: is there a raw text value for this
//! environment name right now? The bridge in [`crate::service::env_bridge`] derives the
//! name from a dotted key and converts the text into the shape of the tree value.

/// A flat source of override values, normally the process environment.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so that one `Config` can be shared between
/// threads.
///
/// # Caching
///
/// Implementations must not cache: every call reflects the current state of the
/// underlying source.
///
/// # Examples
///
/// ```rust
/// use treecfg::ports::OverrideSource;
///
/// struct Fixed;
///
/// impl OverrideSource for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn lookup(&self, name: &str) -> Option<String> {
///         (name == "APP_PORT").then(|| "9090".to_string())
///     }
/// }
///
/// assert_eq!(Fixed.lookup("APP_PORT"), Some("9090".to_string()));
/// assert_eq!(Fixed.lookup("APP_HOST"), None);
/// ```
pub trait OverrideSource: Send + Sync {
    /// Returns the name of this source, used in log output.
    fn name(&self) -> &str;

    /// Looks up the raw override text for an environment name.
    ///
    /// A variable that is set to the empty string is present: it returns
    /// `Some(String::new())`.
    fn lookup(&self, name: &str) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct MapSource(HashMap<String, String>);

    impl OverrideSource for MapSource {
        fn name(&self) -> &str {
            "map"
        }

        fn lookup(&self, name: &str) -> Option<String> {
            self.0.get(name).cloned()
        }
    }

    #[test]
    fn test_source_lookup() {
        let mut values = HashMap::new();
        values.insert("DB_HOST".to_string(), "db".to_string());
        values.insert("EMPTY".to_string(), String::new());
        let source = MapSource(values);

        assert_eq!(source.name(), "map");
        assert_eq!(source.lookup("DB_HOST"), Some("db".to_string()));
        assert_eq!(source.lookup("EMPTY"), Some(String::new()));
        assert_eq!(source.lookup("MISSING"), None);
    }

    #[test]
    fn test_source_is_object_safe() {
        let source: Arc<dyn OverrideSource> = Arc::new(MapSource(HashMap::new()));
        assert_eq!(source.lookup("X"), None);
    }
}
