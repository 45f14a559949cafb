//! QMK info.json parser for matrix dimensions and layout definitions.
//!
//! Only the parts of info.json needed to find unpopulated matrix positions are
//! modelled: `matrix_pins.rows`, `matrix_pins.cols` and each layout's
//! `matrix` assignments. Everything else in the document is ignored.

use anyhow::{Context, Result};
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{MatrixPosition, OccupiedPositions};

/// QMK info.json structure (simplified for our needs)
#[derive(Debug, Clone, Deserialize)]
pub struct QmkInfoJson {
    /// Keyboard name/identifier
    pub keyboard_name: Option<String>,
    /// Available layouts, ordered by name
    pub layouts: BTreeMap<String, LayoutDefinition>,
    /// Matrix pins configuration
    pub matrix_pins: Option<MatrixPins>,
}

/// Layout definition from info.json
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutDefinition {
    /// Physical keys and their matrix assignments
    pub layout: Vec<KeyPosition>,
}

/// Key entry from a layout definition
#[derive(Debug, Clone, Deserialize)]
pub struct KeyPosition {
    /// Matrix position [row, col]
    ///
    /// Signed so that positions outside any matrix still parse and can be
    /// reported instead of failing the whole document.
    pub matrix: Option<[i64; 2]>,
    /// Optional legend, used in diagnostics
    pub label: Option<String>,
}

/// Matrix pins configuration.
///
/// Only the number of pins matters; the pin values themselves are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixPins {
    /// Row pins
    pub rows: Option<Vec<IgnoredAny>>,
    /// Column pins
    pub cols: Option<Vec<IgnoredAny>>,
}

/// Matrix size derived from `matrix_pins`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixDimensions {
    /// Number of row pins
    pub rows: usize,
    /// Number of column pins
    pub cols: usize,
}

/// Parses a QMK info.json document.
///
/// # Arguments
///
/// * `content` - Raw document bytes (must be UTF-8 JSON)
///
/// # Returns
///
/// Parsed QMK info.json structure
pub fn parse_info_json(content: &[u8]) -> Result<QmkInfoJson> {
    let info: QmkInfoJson =
        serde_json::from_slice(content).context("Failed to parse info.json")?;

    Ok(info)
}

/// Reads the matrix size from `matrix_pins`.
///
/// Both `rows` and `cols` must be present; an empty list is a valid zero.
pub fn matrix_dimensions(info: &QmkInfoJson) -> Result<MatrixDimensions> {
    let pins = info
        .matrix_pins
        .as_ref()
        .context("info.json has no matrix_pins section")?;
    let rows = pins
        .rows
        .as_ref()
        .context("info.json is missing matrix_pins.rows")?;
    let cols = pins
        .cols
        .as_ref()
        .context("info.json is missing matrix_pins.cols")?;

    Ok(MatrixDimensions {
        rows: rows.len(),
        cols: cols.len(),
    })
}

/// Extracts available layout names from info.json, in ascending order.
pub fn extract_layout_names(info: &QmkInfoJson) -> Vec<String> {
    info.layouts.keys().cloned().collect()
}

/// Name of the layout used when none is requested.
///
/// This is the name that sorts first in byte order. The choice is arbitrary
/// but stable across runs and across key order in the document.
pub fn default_layout_name(info: &QmkInfoJson) -> Result<&str> {
    info.layouts
        .keys()
        .next()
        .map(String::as_str)
        .context("No layouts defined in info.json")
}

/// Extracts a specific layout definition from info.json.
///
/// # Arguments
///
/// * `info` - Parsed QMK info.json structure
/// * `layout_name` - Name of the layout to extract
///
/// # Returns
///
/// Layout definition if found
pub fn extract_layout_definition<'a>(
    info: &'a QmkInfoJson,
    layout_name: &str,
) -> Result<&'a LayoutDefinition> {
    info.layouts.get(layout_name).context(format!(
        "Layout '{}' not found in info.json. Available layouts: {:?}",
        layout_name,
        extract_layout_names(info)
    ))
}

/// Resolves the layout to use: `requested` by name, or the default one.
///
/// Returns the layout's name alongside its definition.
pub fn select_layout<'a>(
    info: &'a QmkInfoJson,
    requested: Option<&'a str>,
) -> Result<(&'a str, &'a LayoutDefinition)> {
    let name = match requested {
        Some(name) => name,
        None => default_layout_name(info)?,
    };
    let definition = extract_layout_definition(info, name)?;

    Ok((name, definition))
}

/// Collects the matrix positions referenced by a layout.
///
/// Every key must carry a `matrix` assignment. Duplicate positions collapse.
pub fn collect_occupied_positions(
    layout_def: &LayoutDefinition,
    layout_name: &str,
) -> Result<OccupiedPositions> {
    let mut occupied = OccupiedPositions::new();

    for (idx, key_pos) in layout_def.layout.iter().enumerate() {
        let Some(matrix) = key_pos.matrix else {
            anyhow::bail!(
                "Key at index {} in layout '{}' has no matrix position",
                idx,
                layout_name
            );
        };

        let position = MatrixPosition::from(matrix);
        if !occupied.insert(position) {
            debug!(
                layout = layout_name,
                key = idx,
                label = key_pos.label.as_deref().unwrap_or(""),
                "duplicate matrix position {position}"
            );
        }
    }

    Ok(occupied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_info_json() -> &'static str {
        r#"{
            "keyboard_name": "test_keyboard",
            "manufacturer": "Test Manufacturer",
            "matrix_pins": {
                "cols": ["A0", "A1", "A2"],
                "rows": ["B0", "B1"]
            },
            "layouts": {
                "LAYOUT_split": {
                    "layout": [
                        {"x": 0, "y": 0, "matrix": [0, 0], "w": 1.5},
                        {"x": 1.5, "y": 0, "matrix": [0, 1]},
                        {"x": 5, "y": 0, "matrix": [1, 2], "label": "Enter"}
                    ]
                },
                "LAYOUT": {
                    "layout": [
                        {"x": 0, "y": 0, "matrix": [0, 0]},
                        {"x": 1, "y": 0, "matrix": [0, 1]},
                        {"x": 2, "y": 0, "matrix": [0, 2]},
                        {"x": 0, "y": 1, "matrix": [1, 0]},
                        {"x": 1, "y": 1, "matrix": [1, 1]},
                        {"x": 2, "y": 1, "matrix": [1, 2]}
                    ]
                }
            }
        }"#
    }

    #[test]
    fn test_parse_info_json() {
        let info = parse_info_json(create_test_info_json().as_bytes()).unwrap();
        assert_eq!(info.keyboard_name, Some("test_keyboard".to_string()));
        assert_eq!(info.layouts.len(), 2);
        assert!(info.layouts.contains_key("LAYOUT"));
        assert!(info.layouts.contains_key("LAYOUT_split"));
        assert_eq!(info.layouts["LAYOUT_split"].layout[2].label.as_deref(), Some("Enter"));
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_info_json(b"{ not json").unwrap_err();
        assert!(format!("{err:#}").starts_with("Failed to parse info.json"));
    }

    #[test]
    fn test_parse_missing_layouts() {
        let err = parse_info_json(br#"{"matrix_pins": {"rows": [], "cols": []}}"#).unwrap_err();
        assert!(format!("{err:#}").contains("missing field `layouts`"));
    }

    #[test]
    fn test_parse_null_pins() {
        let info = parse_info_json(
            br#"{"matrix_pins": {"rows": ["B0", null], "cols": ["NO_PIN"]}, "layouts": {}}"#,
        )
        .unwrap();
        let dims = matrix_dimensions(&info).unwrap();
        assert_eq!(dims, MatrixDimensions { rows: 2, cols: 1 });
    }

    #[test]
    fn test_parse_non_string_pins() {
        let info = parse_info_json(
            br#"{"matrix_pins": {"rows": [0, 1], "cols": [{"port": "A", "pin": 2}, 3.5, true]}, "layouts": {}}"#,
        )
        .unwrap();
        let dims = matrix_dimensions(&info).unwrap();
        assert_eq!(dims, MatrixDimensions { rows: 2, cols: 3 });
    }

    #[test]
    fn test_matrix_dimensions() {
        let info = parse_info_json(create_test_info_json().as_bytes()).unwrap();
        let dims = matrix_dimensions(&info).unwrap();
        assert_eq!(dims.rows, 2);
        assert_eq!(dims.cols, 3);
    }

    #[test]
    fn test_matrix_dimensions_missing_section() {
        let info = parse_info_json(br#"{"layouts": {}}"#).unwrap();
        let err = matrix_dimensions(&info).unwrap_err();
        assert_eq!(err.to_string(), "info.json has no matrix_pins section");
    }

    #[test]
    fn test_matrix_dimensions_direct_pins() {
        // Direct-wired boards have no rows/cols
        let info =
            parse_info_json(br#"{"matrix_pins": {"direct": [["A0", "A1"]]}, "layouts": {}}"#)
                .unwrap();
        let err = matrix_dimensions(&info).unwrap_err();
        assert_eq!(err.to_string(), "info.json is missing matrix_pins.rows");
    }

    #[test]
    fn test_extract_layout_names_sorted() {
        let info = parse_info_json(create_test_info_json().as_bytes()).unwrap();
        assert_eq!(extract_layout_names(&info), vec!["LAYOUT", "LAYOUT_split"]);
    }

    #[test]
    fn test_default_layout_name() {
        let info = parse_info_json(
            br#"{"layouts": {"b": {"layout": []}, "a": {"layout": []}, "B": {"layout": []}}}"#,
        )
        .unwrap();
        // Uppercase sorts before lowercase in byte order
        assert_eq!(default_layout_name(&info).unwrap(), "B");
    }

    #[test]
    fn test_default_layout_name_empty() {
        let info = parse_info_json(br#"{"layouts": {}}"#).unwrap();
        let err = default_layout_name(&info).unwrap_err();
        assert_eq!(err.to_string(), "No layouts defined in info.json");
    }

    #[test]
    fn test_select_layout() {
        let info = parse_info_json(create_test_info_json().as_bytes()).unwrap();

        let (name, def) = select_layout(&info, None).unwrap();
        assert_eq!(name, "LAYOUT");
        assert_eq!(def.layout.len(), 6);

        let (name, def) = select_layout(&info, Some("LAYOUT_split")).unwrap();
        assert_eq!(name, "LAYOUT_split");
        assert_eq!(def.layout.len(), 3);
    }

    #[test]
    fn test_select_unknown_layout() {
        let info = parse_info_json(create_test_info_json().as_bytes()).unwrap();
        let err = select_layout(&info, Some("LAYOUT_missing")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Layout 'LAYOUT_missing' not found"));
        assert!(message.contains(r#"["LAYOUT", "LAYOUT_split"]"#));
    }

    #[test]
    fn test_collect_occupied_positions() {
        let info = parse_info_json(create_test_info_json().as_bytes()).unwrap();
        let (name, def) = select_layout(&info, Some("LAYOUT_split")).unwrap();
        let occupied = collect_occupied_positions(def, name).unwrap();

        assert_eq!(occupied.len(), 3);
        assert!(occupied.contains(0, 0));
        assert!(occupied.contains(0, 1));
        assert!(occupied.contains(1, 2));
        assert!(!occupied.contains(1, 0));
    }

    #[test]
    fn test_collect_occupied_positions_duplicates() {
        let info = parse_info_json(
            br#"{"layouts": {"L": {"layout": [{"matrix": [0, 1]}, {"matrix": [0, 1]}]}}}"#,
        )
        .unwrap();
        let occupied = collect_occupied_positions(&info.layouts["L"], "L").unwrap();
        assert_eq!(occupied.len(), 1);
    }

    #[test]
    fn test_collect_occupied_positions_missing_matrix() {
        let info = parse_info_json(
            br#"{"layouts": {"L": {"layout": [{"matrix": [0, 0]}, {"x": 1, "y": 0}]}}}"#,
        )
        .unwrap();
        let err = collect_occupied_positions(&info.layouts["L"], "L").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Key at index 1 in layout 'L' has no matrix position"
        );
    }

    #[test]
    fn test_wide_and_negative_matrix_indices_parse() {
        let info = parse_info_json(
            br#"{"layouts": {"L": {"layout": [{"matrix": [300, 0]}, {"matrix": [-1, 0]}, {"matrix": [0, 0]}]}}}"#,
        )
        .unwrap();
        let occupied = collect_occupied_positions(&info.layouts["L"], "L").unwrap();

        assert_eq!(occupied.len(), 3);
        assert!(occupied.contains(300, 0));
        assert!(occupied.contains(0, 0));
        assert_eq!(
            occupied.iter().filter(|p| p.is_within(1, 2)).count(),
            1,
            "Only [0, 0] lies inside a 1x2 matrix"
        );
    }

    #[test]
    fn test_non_integer_matrix_index_rejected() {
        let err = parse_info_json(br#"{"layouts": {"L": {"layout": [{"matrix": ["a", 0]}]}}}"#)
            .unwrap_err();
        assert!(format!("{err:#}").starts_with("Failed to parse info.json"));
    }
}
