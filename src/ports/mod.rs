// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits are the seams between the resolution engine and the outside world: the
//! flat override source (normally the process environment) and the document parser.
//! They are implemented by the adapters layer.

pub mod override_source;
pub mod parser;

// Re-export commonly used types
pub use override_source::OverrideSource;
pub use parser::ConfigParser;
