//! CLI command handlers for deadkeys.
//!
//! This module provides the scriptable entry point used from keyboard build
//! scripts: info.json in on stdin, dead key masks out on stdout.

pub mod common;
pub mod deadkeys;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliErrorKind, CliResult, ExitCode};
pub use deadkeys::{DeadKeysArgs, OutputFormat};
