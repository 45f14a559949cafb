//! Parsing for QMK keyboard metadata.
//!
//! This module handles reading the matrix and layout sections of QMK
//! info.json documents.

pub mod info_json;

pub use info_json::{parse_info_json, QmkInfoJson};
