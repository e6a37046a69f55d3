// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration handle and its parts.
//!
//! [`Config`] is the entry point. It is assembled from a [`Store`] holding the tree and
//! an [`EnvBridge`] resolving overrides; [`ConfigBuilder`] loads it from disk.

pub mod builder;
pub mod config;
pub mod env_bridge;
pub mod store;

// Re-export commonly used types
pub use builder::ConfigBuilder;
pub use config::Config;
pub use env_bridge::EnvBridge;
pub use store::Store;
