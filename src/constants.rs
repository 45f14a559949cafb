//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the defaults for generated firmware output.

/// Default C macro name emitted by `--format define`.
///
/// Matches the name the beam matrix scanner reads from `beam_config.h`.
pub const DEFAULT_DEFINE_NAME: &str = "BEAM_DEAD_KEYS";

/// Widest matrix row a mask can describe (one bit per column in a `u64`).
pub const MAX_MATRIX_COLS: usize = 64;

/// Indentation used for the initializer line of a generated `#define`.
pub const DEFINE_INDENT: &str = "    ";
