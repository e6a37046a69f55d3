// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer connecting the ports to the outside world.
//!
//! The environment adapter implements `OverrideSource`; the YAML adapter implements
//! `ConfigParser` and loads documents from disk; the env-file adapter feeds `.env`
//! files into the process environment.

#[cfg(feature = "dotenv")]
pub mod env_file;
pub mod env_var;
#[cfg(feature = "yaml")]
pub mod yaml_file;

#[cfg(feature = "dotenv")]
pub use env_file::apply_env_file;
pub use env_var::EnvVarAdapter;
#[cfg(feature = "yaml")]
pub use yaml_file::{YamlFileAdapter, YamlParser};
