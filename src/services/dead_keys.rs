//! Dead key computation service.
//!
//! Ties the info.json parser to the mask model: picks a layout, collects its
//! occupied matrix positions and derives the per-row dead key masks.

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    models::DeadKeyMasks,
    parser::info_json::{
        collect_occupied_positions, matrix_dimensions, parse_info_json, select_layout,
        QmkInfoJson,
    },
};

/// Service for computing dead key masks from QMK metadata.
pub struct DeadKeyService;

impl DeadKeyService {
    /// Computes dead key masks for a parsed info.json.
    ///
    /// # Arguments
    ///
    /// * `info` - Parsed QMK info.json structure
    /// * `layout` - Layout to use; `None` picks the first name in sorted order
    ///
    /// # Returns
    ///
    /// * `Ok(DeadKeyMasks)` - One mask per matrix row
    /// * `Err(...)` - Missing matrix pins, no layouts, unknown layout, a key
    ///   without a matrix position, or a matrix too wide for the mask type
    ///
    /// # Examples
    ///
    /// ```
    /// use deadkeys::parser::info_json::parse_info_json;
    /// use deadkeys::services::DeadKeyService;
    ///
    /// let info = parse_info_json(br#"{
    ///     "matrix_pins": {"rows": ["B0", "B1"], "cols": ["A0", "A1"]},
    ///     "layouts": {"x": {"layout": [{"matrix": [0, 0]}, {"matrix": [1, 1]}]}}
    /// }"#)?;
    /// let masks = DeadKeyService::compute(&info, None)?;
    /// assert_eq!(masks.to_hex_list(), "0x2, 0x1");
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn compute(info: &QmkInfoJson, layout: Option<&str>) -> Result<DeadKeyMasks> {
        let dims = matrix_dimensions(info)?;
        let (layout_name, layout_def) = select_layout(info, layout)?;

        info!(
            layout = layout_name,
            rows = dims.rows,
            cols = dims.cols,
            keys = layout_def.layout.len(),
            "computing dead keys"
        );

        let occupied = collect_occupied_positions(layout_def, layout_name)?;

        if occupied.is_empty() {
            warn!(
                layout = layout_name,
                "layout has no keys; every matrix position will be dead"
            );
        }

        for position in occupied.iter() {
            if !position.is_within(dims.rows, dims.cols) {
                warn!(
                    layout = layout_name,
                    "key at matrix position {position} is outside the {}x{} matrix and is ignored",
                    dims.rows,
                    dims.cols
                );
            }
        }

        DeadKeyMasks::compute(layout_name, dims.rows, dims.cols, &occupied)
    }

    /// Parses raw info.json bytes and computes dead key masks.
    pub fn compute_from_slice(content: &[u8], layout: Option<&str>) -> Result<DeadKeyMasks> {
        let info = parse_info_json(content)?;
        Self::compute(&info, layout)
    }
}
