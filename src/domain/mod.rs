// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and logic.
//!
//! The value model, dotted-key addressing and coercion rules live here. Nothing in this
//! layer touches the filesystem or the process environment.

pub mod coerce;
pub mod config_key;
pub mod config_value;
pub mod errors;

// Re-export commonly used types
pub use coerce::Coerce;
pub use config_key::DottedKey;
pub use config_value::{ConfigTree, ConfigValue};
pub use errors::{ConfigError, Result};
