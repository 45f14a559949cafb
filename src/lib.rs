//! Dead key mask library
//!
//! This library computes per-row "dead key" bitmasks for QMK keyboard
//! matrices: for each matrix row, the set of columns with no switch mounted in
//! the selected layout. It parses the matrix and layout sections of QMK
//! info.json files and renders the masks for firmware configuration headers.

// Module declarations
pub mod cli;
pub mod constants;
pub mod models;
pub mod parser;
pub mod services;
