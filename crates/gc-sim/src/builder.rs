//! Fluent builder for constructing a [`Sim`].

use log::debug;

use gc_behavior::TargetModel;
use gc_core::{Cell, SimConfig, SimRng};
use gc_mobility::MobilityEngine;
use gc_spatial::{Pathfinder, TerrainMap};

use crate::{Markers, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<M, T, P>`].
///
/// # Required inputs
///
/// - [`SimConfig`] - total ticks, seed, frame interval, …
/// - `M: TerrainMap` - the shared map (e.g. [`gc_spatial::GridMap`])
/// - `T: TargetModel` - target selection (e.g. [`gc_behavior::ChasePlayer`])
/// - `P: Pathfinder` - the search (e.g. [`gc_spatial::AStarPathfinder`])
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                   |
/// |---------------------|-------------------------------------------|
/// | `.player(c)`        | Map centre `(rows / 2, cols / 2)`         |
/// | `.agent(c)`         | No fixed agents                           |
/// | `.spawn_random(n)`  | No random agents                          |
/// | `.markers(s, g)`    | No markers                                |
///
/// Fixed agents are registered first, in call order, then random ones.
///
/// # Example
///
/// ```
/// use gc_behavior::ChasePlayer;
/// use gc_core::{Cell, SimConfig};
/// use gc_sim::{NoopSink, RunOutcome, SimBuilder};
/// use gc_spatial::{AStarPathfinder, GridMap};
///
/// let map = GridMap::open(5, 5).unwrap();
/// let mut sim = SimBuilder::new(SimConfig::default(), map, ChasePlayer, AStarPathfinder)
///     .player(Cell::new(4, 4))
///     .agent(Cell::new(0, 0))
///     .build()
///     .unwrap();
/// assert!(matches!(sim.run(&mut NoopSink).unwrap(), RunOutcome::Caught { .. }));
/// ```
pub struct SimBuilder<M: TerrainMap, T: TargetModel, P: Pathfinder> {
    config:     SimConfig,
    map:        M,
    targets:    T,
    pathfinder: P,
    player:     Option<Cell>,
    agents:     Vec<Cell>,
    random:     usize,
    markers:    Option<Markers>,
}

impl<M: TerrainMap, T: TargetModel, P: Pathfinder> SimBuilder<M, T, P> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, map: M, targets: T, pathfinder: P) -> Self {
        Self {
            config,
            map,
            targets,
            pathfinder,
            player:  None,
            agents:  Vec::new(),
            random:  0,
            markers: None,
        }
    }

    /// Starting cell of the player.
    pub fn player(mut self, cell: Cell) -> Self {
        self.player = Some(cell);
        self
    }

    /// Register one agent on `cell`.  Blocked cells are allowed: the agent
    /// can still walk off them.
    pub fn agent(mut self, cell: Cell) -> Self {
        self.agents.push(cell);
        self
    }

    pub fn agents<I: IntoIterator<Item = Cell>>(mut self, cells: I) -> Self {
        self.agents.extend(cells);
        self
    }

    /// Add `n` agents on distinct random passable cells, never the player's
    /// cell nor a cell already taken.  Placement is drawn from
    /// `config.seed`.
    pub fn spawn_random(mut self, n: usize) -> Self {
        self.random = n;
        self
    }

    /// Static start/goal markers carried on every frame.
    pub fn markers(mut self, start: Cell, goal: Cell) -> Self {
        self.markers = Some(Markers { start, goal });
        self
    }

    /// Validate inputs, place agents, and return a ready-to-run [`Sim`].
    ///
    /// # Errors
    ///
    /// - [`SimError::Config`] if `config.validate()` fails.
    /// - [`SimError::Spatial`] if the player or a fixed agent is off the map.
    /// - [`SimError::NoSpawnCell`] if random spawns run out of free cells.
    pub fn build(self) -> SimResult<Sim<M, T, P>> {
        self.config.validate()?;

        // ── Validate fixed positions ──────────────────────────────────────
        let player = self.player.unwrap_or_else(|| {
            Cell::new((self.map.rows() / 2) as i32, (self.map.cols() / 2) as i32)
        });
        self.map.index_checked(player)?;
        for &cell in &self.agents {
            self.map.index_checked(cell)?;
        }

        // ── Random spawns ─────────────────────────────────────────────────
        let mut positions = self.agents;
        if self.random > 0 {
            let mut rng = SimRng::new(self.config.seed);
            let mut free = free_cells(&self.map, player, &positions);
            for placed in 0..self.random {
                if free.is_empty() {
                    return Err(SimError::NoSpawnCell { requested: self.random, placed });
                }
                let pick = rng.gen_range(0..free.len());
                positions.push(free.swap_remove(pick));
            }
        }

        // ── Build mobility engine and place agents ────────────────────────
        let mut mobility = MobilityEngine::new(self.pathfinder);
        for &cell in &positions {
            mobility.spawn(cell)?;
        }
        debug!(
            "sim built: {}x{} map, player at {player}, {} agents",
            self.map.rows(),
            self.map.cols(),
            positions.len()
        );

        Ok(Sim {
            clock:    self.config.make_clock(),
            config:   self.config,
            map:      self.map,
            mobility,
            targets:  self.targets,
            markers:  self.markers,
            player,
        })
    }
}

/// Passable cells in row-major order, minus the player's and `taken`.
fn free_cells<M: TerrainMap>(map: &M, player: Cell, taken: &[Cell]) -> Vec<Cell> {
    (0..map.rows())
        .flat_map(|r| (0..map.cols()).map(move |c| Cell::new(r as i32, c as i32)))
        .filter(|&cell| map.is_passable(cell) && cell != player && !taken.contains(&cell))
        .collect()
}
