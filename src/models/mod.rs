//! Data models for keyboard matrices and dead key masks.
//!
//! Models are independent of parsing and output formatting concerns.

pub mod dead_keys;
pub mod matrix;

pub use dead_keys::DeadKeyMasks;
pub use matrix::{MatrixPosition, OccupiedPositions};
