//! Bundle target lowering for ninja builds.
//!
//! This library turns resolved `create_bundle` targets into the ninja
//! statements that assemble them:
//! - copying bundle data into the bundle directories
//! - compiling asset catalogs into `Assets.car`
//! - running a per-target code-signing script
//! - stamping the target and aliasing the bundle root directory
//!
//! It can be used both as a CLI tool driven by a TOML manifest and as a
//! library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
