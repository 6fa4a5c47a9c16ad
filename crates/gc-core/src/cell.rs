//! Grid cell coordinate.
//!
//! Rows and columns are `i32` so that stepping off the edge of a map yields a
//! representable (negative or too-large) cell that bounds checks reject,
//! rather than an underflow.

use crate::Direction;

/// One discrete grid position, `(row, col)`.  Identity is by value.
///
/// Ordering is row-major, which gives searches a total order to fall back on
/// when everything else ties.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance `|d_row| + |d_col|`.
    ///
    /// Admissible and consistent for 4-directional grids whose step cost is
    /// at least 1.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The cell one step away in `dir`.  May lie outside any map.
    #[inline]
    pub fn step(self, dir: Direction) -> Cell {
        let (d_row, d_col) = dir.offset();
        Cell::new(self.row + d_row, self.col + d_col)
    }

    /// The four axis-aligned neighbours in [`Direction::ALL`] order.
    #[inline]
    pub fn neighbors_4(self) -> [Cell; 4] {
        Direction::ALL.map(|dir| self.step(dir))
    }

    /// `true` if `other` is exactly one axis-aligned step away.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Cell::new(row, col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
