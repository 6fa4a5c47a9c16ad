//! Per-agent path following with a cached route.

use log::debug;

use gc_core::Cell;
use gc_spatial::{Path, Pathfinder, SpatialResult, TerrainMap};

/// What the controller is doing after its latest tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerPhase {
    /// No remaining moves: standing on the target, blocked, or no target.
    #[default]
    Idle,
    /// Walking a cached path with at least one cell left ahead.
    Following,
}

/// Result of one [`AgentController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Advanced one cell along the cached path.
    Moved { from: Cell, to: Cell, replanned: bool },
    /// Stayed put: already on the target, or nothing to chase this tick.
    Holding { replanned: bool },
    /// A fresh search found no path; the agent stays where it is.
    Unreachable,
}

impl StepOutcome {
    /// `true` if a search ran during this tick.
    pub fn replanned(&self) -> bool {
        match *self {
            StepOutcome::Moved { replanned, .. } | StepOutcome::Holding { replanned } => replanned,
            StepOutcome::Unreachable => true,
        }
    }

    pub fn moved(&self) -> bool {
        matches!(self, StepOutcome::Moved { .. })
    }
}

/// A search result tagged with the goal it was computed for.
#[derive(Debug, Clone)]
struct CachedRoute {
    path:   Path,
    /// Index into `path.cells()` of the cell the agent occupies.
    cursor: usize,
    goal:   Cell,
}

impl CachedRoute {
    /// Cell the agent should be standing on, or `None` for an unreachable
    /// result (empty path).
    fn head(&self) -> Option<Cell> {
        self.path.cells().get(self.cursor).copied()
    }

    fn next(&self) -> Option<Cell> {
        self.path.cells().get(self.cursor + 1).copied()
    }

    fn remaining(&self) -> &[Cell] {
        self.path.cells().get(self.cursor + 1..).unwrap_or(&[])
    }
}

/// Movement state for one agent.
///
/// Each tick the controller is handed the live target.  It searches only
/// when its cached route no longer applies:
///
/// - there is no cached route,
/// - the route was computed for a different goal, or
/// - the agent is not standing on the route's head (it was moved externally).
///
/// Otherwise it steps one cell along the cached route.  An unreachable
/// result is cached too but has no head, so it never counts as valid and
/// the search is retried on the next tick.
#[derive(Debug, Clone)]
pub struct AgentController {
    position: Cell,
    route:    Option<CachedRoute>,
    phase:    ControllerPhase,
    replans:  u64,
}

impl AgentController {
    pub fn new(position: Cell) -> Self {
        Self {
            position,
            route:   None,
            phase:   ControllerPhase::Idle,
            replans: 0,
        }
    }

    #[inline]
    pub fn position(&self) -> Cell {
        self.position
    }

    #[inline]
    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    /// Number of searches this controller has run.
    #[inline]
    pub fn replans(&self) -> u64 {
        self.replans
    }

    /// Goal of the cached route, if any.
    pub fn cached_goal(&self) -> Option<Cell> {
        self.route.as_ref().map(|r| r.goal)
    }

    /// The most recent search result (possibly unreachable).
    pub fn latest_path(&self) -> Option<&Path> {
        self.route.as_ref().map(|r| &r.path)
    }

    /// Cells still ahead on the cached route, excluding the current one.
    pub fn remaining(&self) -> &[Cell] {
        match &self.route {
            Some(route) => route.remaining(),
            None => &[],
        }
    }

    /// Teleport to `cell`.  The cached route is kept; the next tick sees the
    /// agent off the route's head and searches again.
    pub fn place(&mut self, cell: Cell) {
        self.position = cell;
        self.phase = ControllerPhase::Idle;
    }

    /// `true` if the next tick toward `target` would run a search.
    pub fn needs_replan(&self, target: Cell) -> bool {
        match &self.route {
            None => true,
            Some(route) => route.goal != target || route.head() != Some(self.position),
        }
    }

    /// Advance one tick toward `target`.
    ///
    /// `None` means there is nothing to chase: the agent holds its cell and
    /// keeps its cached route for later.  The search (when needed) and the
    /// first step happen in the same tick.
    ///
    /// # Errors
    ///
    /// Propagates search errors (a target outside the map).  The controller
    /// is left unchanged in that case.
    pub fn tick<P, M>(&mut self, pathfinder: &P, map: &M, target: Option<Cell>) -> SpatialResult<StepOutcome>
    where
        P: Pathfinder,
        M: TerrainMap + ?Sized,
    {
        let Some(target) = target else {
            self.phase = ControllerPhase::Idle;
            return Ok(StepOutcome::Holding { replanned: false });
        };

        let replanned = self.needs_replan(target);
        if replanned {
            let path = pathfinder.find_path(map, self.position, target)?;
            self.replans += 1;
            debug!(
                "replan #{} {} -> {}: {} moves, {} expanded",
                self.replans,
                self.position,
                target,
                path.moves(),
                path.expanded()
            );
            let reachable = path.is_reachable();
            self.route = Some(CachedRoute { path, cursor: 0, goal: target });
            if !reachable {
                self.phase = ControllerPhase::Idle;
                return Ok(StepOutcome::Unreachable);
            }
        }

        let Some(route) = self.route.as_mut() else {
            self.phase = ControllerPhase::Idle;
            return Ok(StepOutcome::Holding { replanned });
        };
        match route.next() {
            Some(next) => {
                let from = self.position;
                route.cursor += 1;
                self.position = next;
                self.phase = if route.next().is_some() {
                    ControllerPhase::Following
                } else {
                    ControllerPhase::Idle
                };
                Ok(StepOutcome::Moved { from, to: next, replanned })
            }
            None => {
                self.phase = ControllerPhase::Idle;
                Ok(StepOutcome::Holding { replanned })
            }
        }
    }
}
