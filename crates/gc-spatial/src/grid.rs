//! Terrain maps and their builder.
//!
//! # Data layout
//!
//! [`GridMap`] stores passability as one dense row-major `Vec<bool>`.  Cell
//! `(row, col)` lives at index `row * cols + col`; the search keeps its own
//! per-query arrays in the same layout, so neighbour lookups are plain
//! indexed loads.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) holds every passable cell.  It answers
//! "nearest passable cell to X", which callers use to snap spawn points and
//! scripted positions onto walkable terrain.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use gc_core::Cell;

use crate::{SpatialError, SpatialResult};

// ── TerrainMap ────────────────────────────────────────────────────────────────

/// Read-only passability source consumed by path search.
///
/// Implementations must not change while a search or a simulation session
/// is running; dimensions are fixed for the lifetime of the value.
///
/// Only [`rows`](Self::rows), [`cols`](Self::cols) and
/// [`is_passable`](Self::is_passable) are required.
pub trait TerrainMap {
    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// `true` if `cell` may be entered.  Must return `false` for cells
    /// outside the map.
    fn is_passable(&self, cell: Cell) -> bool;

    /// Cost of entering `cell`.  Values below 1 are treated as 1 so the
    /// Manhattan heuristic stays admissible.
    fn step_cost(&self, _cell: Cell) -> u32 {
        1
    }

    #[inline]
    fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows()
            && (cell.col as usize) < self.cols()
    }

    /// Row-major index of `cell`, or `None` outside the map.
    #[inline]
    fn index_of(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.row as usize * self.cols() + cell.col as usize)
    }

    /// Row-major index of `cell`, or [`SpatialError::OutOfBounds`].
    fn index_checked(&self, cell: Cell) -> SpatialResult<usize> {
        self.index_of(cell).ok_or(SpatialError::OutOfBounds {
            cell,
            rows: self.rows(),
            cols: self.cols(),
        })
    }
}

impl<T: TerrainMap + ?Sized> TerrainMap for &T {
    fn rows(&self) -> usize {
        (**self).rows()
    }

    fn cols(&self) -> usize {
        (**self).cols()
    }

    fn is_passable(&self, cell: Cell) -> bool {
        (**self).is_passable(cell)
    }

    fn step_cost(&self, cell: Cell) -> u32 {
        (**self).step_cost(cell)
    }
}

// ── R-tree cell entry ─────────────────────────────────────────────────────────

/// A passable cell in the spatial index.  Coordinates are `f64` so squared
/// distances stay finite for any pair of `i32` cells.
#[derive(Clone)]
struct CellEntry {
    point: [f64; 2], // [row, col]
    cell:  Cell,
}

impl CellEntry {
    fn new(cell: Cell) -> Self {
        Self { point: point_of(cell), cell }
    }
}

#[inline]
fn point_of(cell: Cell) -> [f64; 2] {
    [f64::from(cell.row), f64::from(cell.col)]
}

impl RTreeObject for CellEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CellEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let d_row = self.point[0] - point[0];
        let d_col = self.point[1] - point[1];
        d_row * d_row + d_col * d_col
    }
}

// ── GridMap ───────────────────────────────────────────────────────────────────

/// Dense passable/blocked grid plus a spatial index of passable cells.
///
/// Build one with [`GridMapBuilder`] or one of the table constructors.
/// Every constructor rejects zero-sized maps.
#[derive(Clone)]
pub struct GridMap {
    rows:    usize,
    cols:    usize,
    /// Row-major; `true` = impassable.
    blocked: Vec<bool>,
    passable_idx: RTree<CellEntry>,
}

impl GridMap {
    /// A map of the given size with no obstacles.
    pub fn open(rows: usize, cols: usize) -> SpatialResult<Self> {
        GridMapBuilder::new(rows, cols).build()
    }

    /// Build from a literal table where `0` is free and anything else blocks.
    ///
    /// ```
    /// use gc_core::Cell;
    /// use gc_spatial::{GridMap, TerrainMap};
    ///
    /// let map = GridMap::from_table(&[
    ///     [0, 1, 0],
    ///     [0, 0, 0],
    /// ]).unwrap();
    /// assert!(!map.is_passable(Cell::new(0, 1)));
    /// assert_eq!(map.passable_count(), 5);
    /// ```
    pub fn from_table<R: AsRef<[u8]>>(table: &[R]) -> SpatialResult<Self> {
        Self::from_rows(table, |&v| v != 0)
    }

    /// Build from an ASCII picture: `#` blocks, any other character is free.
    /// Blank lines and surrounding whitespace are ignored.
    pub fn from_ascii(picture: &str) -> SpatialResult<Self> {
        let lines: Vec<&[u8]> = picture
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::as_bytes)
            .collect();
        Self::from_rows(&lines, |&b| b == b'#')
    }

    /// Classify a height field: cells strictly below `threshold` block
    /// movement (deep water in noise-generated terrain), the rest are free.
    pub fn from_heights<R: AsRef<[f32]>>(heights: &[R], threshold: f32) -> SpatialResult<Self> {
        Self::from_rows(heights, |&h| h < threshold)
    }

    fn from_rows<T, R, F>(rows: &[R], is_blocked: F) -> SpatialResult<Self>
    where
        R: AsRef<[T]>,
        F: Fn(&T) -> bool,
    {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut b = GridMapBuilder::new(n_rows, n_cols);

        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_cols {
                return Err(SpatialError::RaggedTable { row: r, expected: n_cols, got: row.len() });
            }
            for (c, value) in row.iter().enumerate() {
                if is_blocked(value) {
                    b.block(Cell::new(r as i32, c as i32));
                }
            }
        }
        b.build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.blocked.len()
    }

    pub fn passable_count(&self) -> usize {
        self.passable_idx.size()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` for in-bounds obstacles.  Out-of-bounds cells are neither
    /// blocked nor passable; check [`TerrainMap::contains`] first.
    #[inline]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.index_of(cell).is_some_and(|i| self.blocked[i])
    }

    /// All passable cells in row-major order.
    pub fn passable_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols;
        self.blocked
            .iter()
            .enumerate()
            .filter(|&(_, &b)| !b)
            .map(move |(i, _)| Cell::new((i / cols) as i32, (i % cols) as i32))
    }

    /// The passable cell closest (Euclidean) to `cell`, which may itself lie
    /// outside the map.  Returns `None` only if the map has no passable cell.
    pub fn nearest_passable(&self, cell: Cell) -> Option<Cell> {
        self.passable_idx
            .nearest_neighbor(&point_of(cell))
            .map(|entry| entry.cell)
    }

    /// Up to `k` passable cells ordered by ascending distance from `cell`.
    pub fn k_nearest_passable(&self, cell: Cell, k: usize) -> Vec<Cell> {
        self.passable_idx
            .nearest_neighbor_iter(&point_of(cell))
            .take(k)
            .map(|entry| entry.cell)
            .collect()
    }
}

impl std::fmt::Debug for GridMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridMap")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("passable", &self.passable_count())
            .finish()
    }
}

impl TerrainMap for GridMap {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn is_passable(&self, cell: Cell) -> bool {
        self.index_of(cell).is_some_and(|i| !self.blocked[i])
    }
}

// ── GridMapBuilder ────────────────────────────────────────────────────────────

/// Construct a [`GridMap`] from a size and a list of obstacles, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use gc_core::Cell;
/// use gc_spatial::{GridMapBuilder, TerrainMap};
///
/// let mut b = GridMapBuilder::new(15, 20);
/// b.block_all([Cell::new(6, 5), Cell::new(7, 5), Cell::new(8, 5)]);
/// let map = b.build().unwrap();
/// assert_eq!(map.rows(), 15);
/// assert!(!map.is_passable(Cell::new(7, 5)));
/// ```
pub struct GridMapBuilder {
    rows:      usize,
    cols:      usize,
    obstacles: Vec<Cell>,
}

impl GridMapBuilder {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, obstacles: Vec::new() }
    }

    /// Mark `cell` impassable.  Duplicates are harmless.
    pub fn block(&mut self, cell: Cell) -> &mut Self {
        self.obstacles.push(cell);
        self
    }

    pub fn block_all<I: IntoIterator<Item = Cell>>(&mut self, cells: I) -> &mut Self {
        self.obstacles.extend(cells);
        self
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Consume the builder and produce a [`GridMap`].
    ///
    /// # Errors
    ///
    /// - [`SpatialError::EmptyMap`] if either dimension is zero.
    /// - [`SpatialError::TooLarge`] if a coordinate would not fit in `i32`.
    /// - [`SpatialError::OutOfBounds`] for an obstacle outside the map.
    ///
    /// Time complexity: O(R·C) for the grid + O(P log P) for the R-tree bulk
    /// load, where P = passable cells.
    pub fn build(self) -> SpatialResult<GridMap> {
        let (rows, cols) = (self.rows, self.cols);
        if rows == 0 || cols == 0 {
            return Err(SpatialError::EmptyMap { rows, cols });
        }
        let cell_count = rows
            .checked_mul(cols)
            .filter(|_| rows <= i32::MAX as usize && cols <= i32::MAX as usize)
            .ok_or(SpatialError::TooLarge { rows, cols })?;

        let mut blocked = vec![false; cell_count];
        for cell in self.obstacles {
            let in_bounds = cell.row >= 0
                && cell.col >= 0
                && (cell.row as usize) < rows
                && (cell.col as usize) < cols;
            if !in_bounds {
                return Err(SpatialError::OutOfBounds { cell, rows, cols });
            }
            blocked[cell.row as usize * cols + cell.col as usize] = true;
        }

        let entries: Vec<CellEntry> = blocked
            .iter()
            .enumerate()
            .filter(|&(_, &b)| !b)
            .map(|(i, _)| CellEntry::new(Cell::new((i / cols) as i32, (i % cols) as i32)))
            .collect();
        let passable_idx = RTree::bulk_load(entries);

        Ok(GridMap { rows, cols, blocked, passable_idx })
    }
}
