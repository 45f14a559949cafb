//! Electrical matrix positions referenced by a QMK layout.

use std::collections::BTreeSet;
use std::fmt;

/// A (row, col) intersection in the keyboard's switch matrix.
///
/// Ordered row-major so that sets of positions iterate in scan order.
/// Indices are signed: a layout may reference positions that lie outside
/// the matrix, including negative ones, and those simply never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatrixPosition {
    /// Matrix row (0-based)
    pub row: i64,
    /// Matrix column (0-based)
    pub col: i64,
}

impl MatrixPosition {
    /// Creates a new matrix position.
    #[must_use]
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Returns true if this position lies inside a `rows` x `cols` matrix.
    #[must_use]
    pub fn is_within(&self, rows: usize, cols: usize) -> bool {
        usize::try_from(self.row).is_ok_and(|row| row < rows)
            && usize::try_from(self.col).is_ok_and(|col| col < cols)
    }
}

impl From<[i64; 2]> for MatrixPosition {
    fn from([row, col]: [i64; 2]) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for MatrixPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

/// The set of matrix positions that have a physical key mounted.
///
/// Inserting a position twice is harmless; the duplicate collapses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupiedPositions {
    positions: BTreeSet<MatrixPosition>,
}

impl OccupiedPositions {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a position, returning false if it was already present.
    pub fn insert(&mut self, position: MatrixPosition) -> bool {
        self.positions.insert(position)
    }

    /// Returns true if a key is mounted at `(row, col)`.
    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        match (i64::try_from(row), i64::try_from(col)) {
            (Ok(row), Ok(col)) => self.positions.contains(&MatrixPosition::new(row, col)),
            _ => false,
        }
    }

    /// Number of distinct occupied positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if no position is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterates positions in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &MatrixPosition> {
        self.positions.iter()
    }
}

impl FromIterator<MatrixPosition> for OccupiedPositions {
    fn from_iter<I: IntoIterator<Item = MatrixPosition>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}
