//! Read-only simulation state passed to every target callback.

use gc_core::{AgentId, Cell, Tick};

/// A read-only snapshot of the simulation state passed to every
/// [`TargetModel`][crate::TargetModel] call.
///
/// Built once per tick by gc-sim, before any agent moves, so every model
/// call in a tick sees the same positions.
pub struct TargetContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// Cell the player occupies this tick.
    pub player: Cell,

    /// Every live agent's cell, in registration order.
    pub positions: &'a [(AgentId, Cell)],
}

impl<'a> TargetContext<'a> {
    #[inline]
    pub fn new(tick: Tick, player: Cell, positions: &'a [(AgentId, Cell)]) -> Self {
        Self { tick, player, positions }
    }

    /// Current cell of `agent`, if it is live.
    pub fn position_of(&self, agent: AgentId) -> Option<Cell> {
        self.positions
            .iter()
            .find(|(id, _)| *id == agent)
            .map(|&(_, cell)| cell)
    }
}
