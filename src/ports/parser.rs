// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which turns the raw text of a
//! configuration document into a nested [`ConfigTree`].

use crate::domain::{ConfigTree, Result};

/// A trait for parsing configuration documents.
///
/// Unlike flat key/value parsers, implementations keep the document's nesting: a
/// document such as
///
/// ```yaml
/// database:
///   host: localhost
///   port: 5432
/// ```
///
/// becomes a tree with one `database` mapping holding `host` and `port`, with scalars
/// kept in their native types.
///
/// # Examples
///
/// ```rust
/// use treecfg::ports::ConfigParser;
/// use treecfg::domain::{ConfigTree, ConfigValue, Result};
///
/// struct KeyValueParser;
///
/// impl ConfigParser for KeyValueParser {
///     fn parse(&self, content: &str) -> Result<ConfigTree> {
///         let mut tree = ConfigTree::new();
///         for line in content.lines() {
///             if let Some((k, v)) = line.split_once('=') {
///                 tree.insert(k.to_string(), ConfigValue::from(v));
///             }
///         }
///         Ok(tree)
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["kv"]
///     }
/// }
///
/// let tree = KeyValueParser.parse("name=svc").unwrap();
/// assert_eq!(tree.get("name"), Some(&ConfigValue::from("svc")));
/// ```
pub trait ConfigParser {
    /// Parses document content into a configuration tree.
    ///
    /// An empty document yields an empty tree. A document whose top level is not a
    /// mapping is rejected with `ConfigError::ParseError`.
    fn parse(&self, content: &str) -> Result<ConfigTree>;

    /// Returns the file extensions (without the leading dot) handled by this parser.
    fn supported_extensions(&self) -> &[&str];
}
