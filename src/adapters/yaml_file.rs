// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML configuration document adapter.
//!
//! This module loads a YAML document into a [`ConfigTree`], locates the document by
//! walking up from a start directory (or in the OS configuration directory), and decodes
//! configuration subtrees into caller types by round-tripping them through YAML text.

use crate::domain::{ConfigError, ConfigTree, ConfigValue, Result};
use crate::ports::ConfigParser;
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for YAML configuration files (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// YAML parser implementation.
///
/// Scalars keep their YAML type: integers become `I64` (or `U64` above `i64::MAX`),
/// floats become `Float`, sequences become `Seq`. Tagged values are unwrapped.
/// Mapping keys that are booleans or numbers are stringified; other non-string keys are
/// skipped.
///
/// # Examples
///
/// ```rust
/// use treecfg::adapters::YamlParser;
/// use treecfg::domain::{ConfigValue, DottedKey};
/// use treecfg::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let tree = parser.parse("database:\n  host: localhost\n  port: 5432").unwrap();
/// assert_eq!(
///     DottedKey::from("database.port").resolve(&tree),
///     Some(&ConfigValue::I64(5432))
/// );
/// ```
#[derive(Debug, Clone)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    /// Decodes a configuration value into `T` through its YAML rendering.
    ///
    /// `key` only labels the error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde::Deserialize;
    /// use treecfg::adapters::YamlParser;
    /// use treecfg::ports::ConfigParser;
    /// use treecfg::domain::ConfigValue;
    ///
    /// #[derive(Deserialize)]
    /// struct Server {
    ///     host: String,
    ///     port: u16,
    /// }
    ///
    /// let tree = YamlParser::new().parse("host: example.com\nport: 8080").unwrap();
    /// let server: Server = YamlParser::decode("", &ConfigValue::Map(tree)).unwrap();
    /// assert_eq!(server.host, "example.com");
    /// assert_eq!(server.port, 8080);
    /// ```
    pub fn decode<T: DeserializeOwned>(key: &str, value: &ConfigValue) -> Result<T> {
        let text = serde_yaml::to_string(value).map_err(|e| ConfigError::DecodeError {
            key: key.to_string(),
            message: format!("Failed to render YAML: {}", e),
            source: Some(Box::new(e)),
        })?;

        serde_yaml::from_str(&text).map_err(|e| ConfigError::DecodeError {
            key: key.to_string(),
            message: format!("Failed to decode YAML: {}", e),
            source: Some(Box::new(e)),
        })
    }

    fn convert_value(value: &Value) -> ConfigValue {
        match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ConfigValue::I64(i)
                } else if let Some(u) = n.as_u64() {
                    ConfigValue::U64(u)
                } else {
                    ConfigValue::Float(n.as_f64().unwrap_or_default())
                }
            }
            Value::String(s) => ConfigValue::String(s.clone()),
            Value::Sequence(seq) => ConfigValue::Seq(seq.iter().map(Self::convert_value).collect()),
            Value::Mapping(map) => ConfigValue::Map(Self::convert_mapping(map)),
            Value::Tagged(tagged) => Self::convert_value(&tagged.value),
        }
    }

    fn convert_mapping(map: &serde_yaml::Mapping) -> ConfigTree {
        let mut tree = ConfigTree::new();
        for (key, val) in map {
            let key = match key {
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => {
                    tracing::debug!("Skipping non-scalar mapping key: {:?}", other);
                    continue;
                }
            };
            tree.insert(key, Self::convert_value(val));
        }
        tree
    }
}

impl Default for YamlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<ConfigTree> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse YAML: {}", e),
            source: Some(Box::new(e)),
        })?;

        match value {
            Value::Null => Ok(ConfigTree::new()),
            Value::Mapping(map) => Ok(Self::convert_mapping(&map)),
            Value::Tagged(tagged) => match &tagged.value {
                Value::Mapping(map) => Ok(Self::convert_mapping(map)),
                other => Err(Self::not_a_mapping(other)),
            },
            other => Err(Self::not_a_mapping(&other)),
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

impl YamlParser {
    fn not_a_mapping(value: &Value) -> ConfigError {
        let kind = match value {
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            _ => "value",
        };
        ConfigError::ParseError {
            message: format!("Top level of the document must be a mapping, found a {}", kind),
            source: None,
        }
    }
}

/// A YAML configuration document loaded from disk.
///
/// # Examples
///
/// ```rust,no_run
/// use treecfg::adapters::YamlFileAdapter;
///
/// // Load from a specific file
/// let adapter = YamlFileAdapter::from_file("/path/to/config.yaml").unwrap();
/// println!("{} top-level keys", adapter.tree().len());
///
/// // Find config.yaml in the current directory or one of its parents
/// let found = YamlFileAdapter::discover(std::path::Path::new("."), "config.yaml");
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileAdapter {
    /// Canonical path of the YAML file
    file_path: PathBuf,
    /// Parsed configuration tree
    tree: ConfigTree,
}

impl YamlFileAdapter {
    /// Loads and parses a YAML file.
    ///
    /// Files over 10MB are rejected with `ConfigError::SourceError`; malformed content
    /// yields `ConfigError::ParseError`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();

        // Canonicalize path to prevent directory traversal attacks
        let canonical_path = file_path.canonicalize().map_err(|e| ConfigError::SourceError {
            source_name: "yaml-file".to_string(),
            message: format!("Invalid or inaccessible path: {}", display_name(&file_path)),
            source: Some(Box::new(e)),
        })?;

        // Check file size before reading to prevent DoS via large files
        let metadata = fs::metadata(&canonical_path).map_err(|e| ConfigError::SourceError {
            source_name: "yaml-file".to_string(),
            message: format!(
                "Failed to read file metadata: {}",
                display_name(&canonical_path)
            ),
            source: Some(Box::new(e)),
        })?;

        if metadata.len() > MAX_YAML_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: "yaml-file".to_string(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_YAML_FILE_SIZE
                ),
                source: None,
            });
        }

        let content = fs::read_to_string(&canonical_path).map_err(|e| ConfigError::SourceError {
            source_name: "yaml-file".to_string(),
            message: format!(
                "Failed to read configuration file: {}",
                display_name(&canonical_path)
            ),
            source: Some(Box::new(e)),
        })?;

        let tree = YamlParser::new().parse(&content)?;
        tracing::info!(
            "Loaded configuration from {} ({} top-level keys)",
            canonical_path.display(),
            tree.len()
        );

        Ok(Self {
            file_path: canonical_path,
            tree,
        })
    }

    /// Loads a YAML file and returns its tree.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ConfigTree> {
        Self::from_file(path).map(Self::into_tree)
    }

    /// Looks for `file_name` in `start` and then in each of its ancestors.
    ///
    /// Returns the first match, or `None` once the filesystem root has been checked.
    pub fn discover(start: &Path, file_name: &str) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            let candidate = dir.join(file_name);
            tracing::trace!("Looking for configuration at {}", candidate.display());
            candidate.is_file().then_some(candidate)
        })
    }

    /// Returns the path of `file_name` in the OS configuration directory of a project.
    ///
    /// This uses the `directories` crate (for example `~/.config/myapp/config.yaml` on
    /// Linux). The path is returned whether or not the file exists; `None` means no
    /// home directory could be determined.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treecfg::adapters::YamlFileAdapter;
    ///
    /// if let Some(path) = YamlFileAdapter::default_location("com.example", "myapp", "config.yaml") {
    ///     assert!(path.ends_with("config.yaml"));
    /// }
    /// ```
    pub fn default_location(qualifier: &str, app_name: &str, file_name: &str) -> Option<PathBuf> {
        ProjectDirs::from(qualifier, "", app_name).map(|dirs| dirs.config_dir().join(file_name))
    }

    /// Returns the path to the configuration file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Returns the parsed tree.
    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    /// Consumes the adapter, returning the parsed tree.
    pub fn into_tree(self) -> ConfigTree {
        self.tree
    }
}

fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}
