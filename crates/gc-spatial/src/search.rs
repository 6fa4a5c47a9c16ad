//! Path search trait and default A* implementation.
//!
//! # Pluggability
//!
//! `gc-mobility` calls search through the [`Pathfinder`] trait, so callers
//! can swap in another strategy (weighted A*, a precomputed distance field,
//! a scripted path) without touching the controller or the sim loop.
//!
//! # Per-query state
//!
//! Each call allocates its own dense `g_score` / `came_from` / `closed`
//! arrays sized to the map.  Nothing survives between calls, so one
//! pathfinder can serve any number of agents in any order.

use log::{debug, trace};

use gc_core::{Cell, Direction};

use crate::frontier::PriorityFrontier;
use crate::grid::TerrainMap;
use crate::SpatialResult;

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a search: cells from start to goal, both inclusive.
///
/// An empty path means the goal is unreachable.  A single-cell path means
/// start and goal coincide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells:    Vec<Cell>,
    /// Cells expanded while producing this result.
    expanded: usize,
}

impl Path {
    /// An unreachable result.
    pub fn unreachable() -> Self {
        Self::default()
    }

    /// Wrap an explicit cell sequence, for custom [`Pathfinder`]s.  The
    /// caller guarantees consecutive cells are 4-adjacent.
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells, expanded: 0 }
    }

    pub fn is_reachable(&self) -> bool {
        !self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells, endpoints included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves needed to walk the path (`len - 1`, or 0).
    pub fn moves(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// `true` if start and goal are the same cell.
    pub fn is_trivial(&self) -> bool {
        self.cells.len() == 1
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable search strategy.
///
/// Implementations must be deterministic: identical map, start and goal give
/// an identical [`Path`].
pub trait Pathfinder {
    /// Shortest path from `start` to `goal`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::OutOfBounds`](crate::SpatialError::OutOfBounds) if
    /// either endpoint lies outside the map.  An unreachable goal is
    /// `Ok(Path::unreachable())`.
    fn find_path<M: TerrainMap + ?Sized>(
        &self,
        map: &M,
        start: Cell,
        goal: Cell,
    ) -> SpatialResult<Path>;
}

// ── AStarPathfinder ───────────────────────────────────────────────────────────

/// A* over the 4-connected grid with the Manhattan heuristic.
///
/// Neighbours are visited in [`Direction::ALL`] order and frontier ties pop
/// first-in first-out, which fixes the choice among equal-length paths.
///
/// | Endpoint case          | Result                                   |
/// |------------------------|------------------------------------------|
/// | `start == goal`        | `[start]`, even if the cell is blocked   |
/// | impassable `start`     | searched normally; start is never re-entered |
/// | impassable `goal`      | unreachable                              |
/// | outside the map        | `Err(OutOfBounds)`                       |
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPathfinder;

impl Pathfinder for AStarPathfinder {
    fn find_path<M: TerrainMap + ?Sized>(
        &self,
        map: &M,
        start: Cell,
        goal: Cell,
    ) -> SpatialResult<Path> {
        astar(map, start, goal)
    }
}

/// Convenience wrapper around [`AStarPathfinder`].
///
/// ```
/// use gc_core::Cell;
/// use gc_spatial::{find_path, GridMap};
///
/// let map = GridMap::from_ascii("
///     ..#
///     ..#
///     ...
/// ").unwrap();
/// let path = find_path(&map, Cell::new(0, 0), Cell::new(0, 2)).unwrap();
/// assert!(!path.is_reachable());
///
/// let path = find_path(&map, Cell::new(0, 0), Cell::new(2, 2)).unwrap();
/// assert_eq!(path.moves(), 4);
/// ```
pub fn find_path<M: TerrainMap + ?Sized>(map: &M, start: Cell, goal: Cell) -> SpatialResult<Path> {
    AStarPathfinder.find_path(map, start, goal)
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// `came_from` value for cells with no predecessor.
const NO_PARENT: usize = usize::MAX;

fn astar<M: TerrainMap + ?Sized>(map: &M, start: Cell, goal: Cell) -> SpatialResult<Path> {
    let start_idx = map.index_checked(start)?;
    map.index_checked(goal)?;
    trace!("astar {start} -> {goal} on {}x{}", map.rows(), map.cols());

    let n = map.rows() * map.cols();
    // g_score[i] = best known cost from start; u32::MAX for unreached.
    let mut g_score   = vec![u32::MAX; n];
    let mut came_from = vec![NO_PARENT; n];
    let mut closed    = vec![false; n];
    let mut expanded  = 0usize;

    g_score[start_idx] = 0;
    let mut frontier = PriorityFrontier::new();
    frontier.push(start, start.manhattan(goal));

    while let Some(current) = frontier.pop_min() {
        if current == goal {
            let cells = reconstruct(map, &came_from, goal);
            trace!("astar {start} -> {goal}: {} moves, {expanded} expanded", cells.len() - 1);
            return Ok(Path { cells, expanded });
        }

        // Every popped cell is in bounds: only in-bounds cells are pushed.
        let Some(cur_idx) = map.index_of(current) else { continue };
        // Stale duplicate of a cell already settled.
        if closed[cur_idx] {
            continue;
        }
        closed[cur_idx] = true;
        expanded += 1;

        let g = g_score[cur_idx];
        for dir in Direction::ALL {
            let next = current.step(dir);
            let Some(next_idx) = map.index_of(next) else { continue };
            if closed[next_idx] || !map.is_passable(next) {
                continue;
            }

            let tentative = g.saturating_add(map.step_cost(next).max(1));
            if tentative < g_score[next_idx] {
                g_score[next_idx]   = tentative;
                came_from[next_idx] = cur_idx;
                frontier.push(next, tentative.saturating_add(next.manhattan(goal)));
            }
        }
    }

    debug!("astar {start} -> {goal}: unreachable after {expanded} expanded");
    Ok(Path { cells: Vec::new(), expanded })
}

/// Walk `came_from` back from `goal` to the start and reverse.
fn reconstruct<M: TerrainMap + ?Sized>(map: &M, came_from: &[usize], goal: Cell) -> Vec<Cell> {
    let cols = map.cols();
    let mut cells = vec![goal];
    let mut cur = map.index_of(goal).map_or(NO_PARENT, |i| came_from[i]);
    while cur != NO_PARENT {
        cells.push(Cell::new((cur / cols) as i32, (cur % cols) as i32));
        cur = came_from[cur];
    }
    cells.reverse();
    cells
}
