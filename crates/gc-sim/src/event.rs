//! What a tick produced.

use gc_core::{AgentId, Cell, Tick};

/// Notable things that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// `agent` ended the tick on the player's cell.
    TargetReached { tick: Tick, agent: AgentId, cell: Cell },
}

/// Summary returned by [`Sim::step`][crate::Sim::step].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick:    Tick,
    /// Agents that ran a search this tick.
    pub replans: usize,
    /// Agents that changed cell this tick.
    pub moved:   usize,
    /// In registration order.
    pub events:  Vec<SimEvent>,
}

impl TickReport {
    /// `true` if the tick ended the pursuit.
    pub fn is_terminal(&self) -> bool {
        !self.events.is_empty()
    }
}

/// How [`Sim::run`][crate::Sim::run] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// An agent reached the player; `agent` is the lowest ID to do so.
    Caught { tick: Tick, agent: AgentId },
    /// The tick budget ran out first.
    Completed { ticks: u64 },
}
