//! The `Sim` struct and its tick loop.

use log::{debug, info};

use gc_behavior::{TargetContext, TargetModel};
use gc_core::{AgentId, Cell, Direction, SimClock, SimConfig, Tick};
use gc_mobility::{MobilityEngine, StepOutcome};
use gc_spatial::{Pathfinder, TerrainMap};

use crate::{AgentFrame, Frame, FrameSink, Markers, RunOutcome, SimEvent, SimResult, TickReport};

/// The pursuit runner.
///
/// `Sim<M, T, P>` owns the map, the roster and the player, and drives one
/// tick at a time:
///
/// 1. **Targets**: for each live agent in registration order, ask the
///    [`TargetModel`] where it should head.  Every model call sees the
///    positions as they were at the start of the tick.
/// 2. **Move**: run each agent's controller once (search if needed, then at
///    most one step).
/// 3. **Detect**: agents standing on the player's cell produce
///    [`SimEvent::TargetReached`].
/// 4. **Report**: emit a [`Frame`] on frame ticks and terminal ticks, then
///    advance the clock.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: TerrainMap, T: TargetModel, P: Pathfinder> {
    /// Global configuration (total ticks, seed, frame interval, …).
    pub config: SimConfig,

    /// Simulation clock.
    pub clock: SimClock,

    /// Read-only for the whole session.
    pub map: M,

    /// Per-agent controllers and the shared pathfinder.
    pub mobility: MobilityEngine<P>,

    /// Target selection.  Called once per live agent per tick.
    pub targets: T,

    /// Drawn on every frame when set.
    pub markers: Option<Markers>,

    pub(crate) player: Cell,
}

impl<M: TerrainMap, T: TargetModel, P: Pathfinder> Sim<M, T, P> {
    // ── Player ────────────────────────────────────────────────────────────

    #[inline]
    pub fn player(&self) -> Cell {
        self.player
    }

    /// Move the player one cell in `direction` if the destination is on the
    /// map and passable; otherwise stay.  Returns `true` if the player moved.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        let next = self.player.step(direction);
        if self.map.is_passable(next) {
            self.player = next;
            true
        } else {
            false
        }
    }

    /// Put the player on `cell`.  Impassable cells are accepted, cells off
    /// the map are not.
    pub fn set_player(&mut self, cell: Cell) -> SimResult<()> {
        self.map.index_checked(cell)?;
        self.player = cell;
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Every live agent's cell, in registration order.
    pub fn positions(&self) -> Vec<(AgentId, Cell)> {
        self.mobility.iter().map(|(id, c)| (id, c.position())).collect()
    }

    /// `true` once the clock has reached `config.end_tick()`.
    pub fn is_finished(&self) -> bool {
        self.clock.current_tick >= self.config.end_tick()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick until an agent reaches the player or the
    /// clock reaches `config.end_tick()`.
    ///
    /// The player does not move on its own; front-ends that script the
    /// player drive [`step`](Self::step) directly.
    pub fn run<S: FrameSink>(&mut self, sink: &mut S) -> SimResult<RunOutcome> {
        let outcome = loop {
            if self.is_finished() {
                break RunOutcome::Completed { ticks: self.clock.current_tick.0 };
            }
            let report = self.step(sink)?;
            if let Some(&SimEvent::TargetReached { tick, agent, .. }) = report.events.first() {
                break RunOutcome::Caught { tick, agent };
            }
        };
        sink.on_run_end(self.clock.current_tick);
        Ok(outcome)
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`
    /// and does not stop on events).  Returns every event produced.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<S: FrameSink>(&mut self, n: u64, sink: &mut S) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();
        for _ in 0..n {
            events.extend(self.step(sink)?.events);
        }
        Ok(events)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Process one tick and advance the clock.
    ///
    /// # Errors
    ///
    /// A target model that names a cell off the map surfaces as
    /// [`SimError::Spatial`](crate::SimError::Spatial).  Targets are checked
    /// before any agent moves, so on error no controller has changed, the
    /// sink has not been called and the clock does not advance.
    pub fn step<S: FrameSink>(&mut self, sink: &mut S) -> SimResult<TickReport> {
        let now = self.clock.current_tick;

        // ── Phase 1: targets from the start-of-tick snapshot ──────────────
        let mut positions = self.positions();
        let targets: Vec<Option<Cell>> = {
            let ctx = TargetContext::new(now, self.player, &positions);
            positions
                .iter()
                .map(|&(agent, _)| self.targets.target(agent, &ctx))
                .collect()
        };
        for &target in targets.iter().flatten() {
            self.map.index_checked(target)?;
        }

        sink.on_tick_start(now);

        // ── Phase 2: one controller tick per agent ────────────────────────
        let mut replans = 0;
        let mut moved = 0;
        for (slot, target) in positions.iter_mut().zip(targets) {
            let outcome = self.mobility.tick_agent(slot.0, &self.map, target)?;
            if outcome.replanned() {
                replans += 1;
            }
            if let StepOutcome::Moved { to, .. } = outcome {
                slot.1 = to;
                moved += 1;
            }
        }

        // ── Phase 3: capture detection ────────────────────────────────────
        let events: Vec<SimEvent> = positions
            .iter()
            .filter(|&&(_, cell)| cell == self.player)
            .map(|&(agent, cell)| SimEvent::TargetReached { tick: now, agent, cell })
            .collect();
        for event in &events {
            let SimEvent::TargetReached { agent, cell, .. } = event;
            info!("{now}: {agent} reached the player at {cell}");
        }

        // ── Phase 4: report ───────────────────────────────────────────────
        if self.config.is_frame_tick(now) || !events.is_empty() {
            sink.on_frame(&self.frame(now, replans));
        }
        debug!("{now}: {moved} moved, {replans} replans, player at {}", self.player);

        self.clock.advance();
        Ok(TickReport { tick: now, replans, moved, events })
    }

    /// Snapshot of the current state, labelled `tick`.
    pub fn frame(&self, tick: Tick, replans: usize) -> Frame<'_> {
        let agents = self.mobility
            .iter()
            .map(|(agent, c)| AgentFrame {
                agent,
                cell:      c.position(),
                remaining: c.remaining(),
                path:      c.latest_path(),
            })
            .collect();
        Frame {
            tick,
            player:  self.player,
            markers: self.markers,
            agents,
            replans,
        }
    }
}
