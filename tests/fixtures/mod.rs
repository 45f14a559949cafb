//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use serde_json::{json, Map, Value};
use std::path::PathBuf;

/// Builds an info.json document with a `rows` x `cols` matrix.
///
/// # Arguments
/// * `rows` - Number of row pins
/// * `cols` - Number of column pins
/// * `layouts` - Layout names with the matrix positions of their keys
///
/// # Returns
/// The document serialized as a JSON string.
pub fn info_json(rows: usize, cols: usize, layouts: &[(&str, &[(u8, u8)])]) -> String {
    let row_pins: Vec<String> = (0..rows).map(|i| format!("B{i}")).collect();
    let col_pins: Vec<String> = (0..cols).map(|i| format!("A{i}")).collect();

    let mut layout_map = Map::new();
    for (name, positions) in layouts {
        let keys: Vec<Value> = positions
            .iter()
            .enumerate()
            .map(|(i, &(row, col))| json!({ "x": i, "y": row, "matrix": [row, col] }))
            .collect();
        layout_map.insert((*name).to_string(), json!({ "layout": keys }));
    }

    json!({
        "keyboard_name": "test_keyboard",
        "matrix_pins": { "rows": row_pins, "cols": col_pins },
        "layouts": layout_map,
    })
    .to_string()
}

/// Every position of a `rows` x `cols` matrix, row-major.
pub fn full_matrix(rows: u8, cols: u8) -> Vec<(u8, u8)> {
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .collect()
}

/// Path to a JSON fixture under tests/fixtures.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set by cargo");
    PathBuf::from(manifest_dir).join("tests/fixtures").join(name)
}

/// Reads a JSON fixture under tests/fixtures.
pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("Failed to read fixture")
}
