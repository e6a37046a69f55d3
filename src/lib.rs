// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide YAML configuration with typed dotted-key lookups.
//!
//! This crate loads one hierarchical configuration document (`config.yaml`) plus an
//! optional `.env` file at startup and answers typed lookups such as
//! `get_u16("http.port")`. Environment variables override the document key by key:
//! `http.port` is overridden by `HTTP_PORT`.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and rules (`ConfigValue`, `DottedKey`, coercion, errors)
//! - **Ports**: Trait definitions that define interfaces (`OverrideSource`, `ConfigParser`)
//! - **Adapters**: The process environment, the YAML document and the `.env` file
//! - **Service**: The `Config` handle, its store, the override bridge and the builder
//!
//! # Lookup Rules
//!
//! - **Precedence**: environment variable, then the document, then the zero value
//! - **Total**: getters never fail; unconvertible values yield the type's zero value
//! - **Typed overrides**: overrides inside mappings keep the type of the value they replace
//! - **Shared**: one lock-guarded tree, safe to read and write from many threads
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML document loading and decoding (default)
//! - `dotenv`: Enable `.env` file support (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust,no_run
//! # fn main() -> treecfg::domain::Result<()> {
//! // Finds config.yaml in the current directory or a parent, applies the .env beside it
//! treecfg::init()?;
//!
//! let name = treecfg::get_string("app.name");
//! let port = treecfg::get_u16_or("http.port", 8080);
//! let timeout = treecfg::get_duration_or("http.timeout", std::time::Duration::from_secs(30));
//! # Ok(())
//! # }
//! ```
//!
//! # Examples
//!
//! An explicit handle avoids the global state:
//!
//! ```rust
//! use treecfg::prelude::*;
//!
//! let config = Config::new();
//! config.set("treecfg_example.workers", 4_i64);
//! assert_eq!(config.get_u32("treecfg_example.workers"), 4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod global;
pub mod ports;
pub mod service;

pub use global::*;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{Coerce, ConfigError, ConfigTree, ConfigValue, DottedKey, Result};
    pub use crate::ports::{ConfigParser, OverrideSource};
    pub use crate::service::{Config, ConfigBuilder};

    pub use crate::adapters::EnvVarAdapter;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::{YamlFileAdapter, YamlParser};
}
