//! Per-row dead key bitmasks for a keyboard matrix.
//!
//! A dead key position is a matrix intersection with no switch mounted. The
//! firmware's matrix scanner masks these out of every scan, and on capacitive
//! boards uses them as reference pads.

use anyhow::Result;
use std::fmt;

use crate::constants::{DEFINE_INDENT, MAX_MATRIX_COLS};
use crate::models::matrix::OccupiedPositions;

/// Dead key bitmask vector for one layout.
///
/// # Invariants
///
/// - `masks.len() == matrix_rows`
/// - every mask is below `1 << matrix_cols`
/// - bit `c` of `masks[r]` is set iff `(r, c)` holds no key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadKeyMasks {
    /// Layout the masks were computed from
    pub layout_name: String,
    /// Number of matrix rows
    pub matrix_rows: usize,
    /// Number of matrix columns
    pub matrix_cols: usize,
    /// One bitmask per row, bit `c` set when column `c` is dead
    pub masks: Vec<u64>,
}

impl DeadKeyMasks {
    /// Computes the masks for a `matrix_rows` x `matrix_cols` matrix.
    ///
    /// Occupied positions outside the matrix do not affect the result.
    pub fn compute(
        layout_name: impl Into<String>,
        matrix_rows: usize,
        matrix_cols: usize,
        occupied: &OccupiedPositions,
    ) -> Result<Self> {
        if matrix_cols > MAX_MATRIX_COLS {
            anyhow::bail!(
                "Matrix has {} columns, but dead key masks support at most {}",
                matrix_cols,
                MAX_MATRIX_COLS
            );
        }

        let mut masks = vec![0u64; matrix_rows];
        for (row, mask) in masks.iter_mut().enumerate() {
            for col in 0..matrix_cols {
                if !occupied.contains(row, col) {
                    *mask |= 1u64 << col;
                }
            }
        }

        Ok(Self {
            layout_name: layout_name.into(),
            matrix_rows,
            matrix_cols,
            masks,
        })
    }

    /// Total number of dead positions across all rows.
    #[must_use]
    pub fn dead_key_count(&self) -> u32 {
        self.masks.iter().map(|mask| mask.count_ones()).sum()
    }

    /// Masks rendered as `0x`-prefixed lowercase hex without padding.
    #[must_use]
    pub fn hex_values(&self) -> Vec<String> {
        self.masks.iter().map(|mask| format!("{mask:#x}")).collect()
    }

    /// Renders the masks as a comma-separated hex list, e.g. `0x2, 0x1`.
    #[must_use]
    pub fn to_hex_list(&self) -> String {
        self.hex_values().join(", ")
    }

    /// Renders a C preprocessor definition for `beam_config.h`.
    ///
    /// ```text
    /// #define BEAM_DEAD_KEYS \
    ///     { 0x2, 0x1 }
    /// ```
    #[must_use]
    pub fn to_c_define(&self, name: &str) -> String {
        let initializer = if self.masks.is_empty() {
            "{ }".to_string()
        } else {
            format!("{{ {} }}", self.to_hex_list())
        };
        format!("#define {name} \\\n{DEFINE_INDENT}{initializer}")
    }
}

impl fmt::Display for DeadKeyMasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_list())
    }
}
