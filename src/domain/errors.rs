// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! Only loading and decoding can fail. Getters are total and never produce a
//! `ConfigError`; see [`crate::domain::coerce`].

use thiserror::Error;

/// The main error type for configuration operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without breaking
/// backwards compatibility.
///
/// # Examples
///
/// ```
/// use treecfg::domain::errors::ConfigError;
///
/// fn locate() -> Result<(), ConfigError> {
///     Err(ConfigError::ConfigFileNotFound {
///         file_name: "config.yaml".to_string(),
///         search_root: "/srv/app".to_string(),
///     })
/// }
///
/// assert!(locate().unwrap_err().to_string().contains("config.yaml"));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No configuration document was found during discovery.
    #[error("Configuration file '{file_name}' not found in '{search_root}' or any parent directory")]
    ConfigFileNotFound {
        /// The file name that was searched for
        file_name: String,
        /// The directory the search started from
        search_root: String,
    },

    /// An error occurred in a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a configuration document.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to decode a configuration subtree into a caller-supplied type.
    #[error("Failed to decode configuration at '{key}': {message}")]
    DecodeError {
        /// The key of the decoded subtree, empty for the whole tree
        key: String,
        /// The error message
        message: String,
        /// The underlying decoding error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
