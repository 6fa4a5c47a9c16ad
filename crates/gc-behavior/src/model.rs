//! The `TargetModel` trait and the built-in models.

use gc_core::{AgentId, Cell};

use crate::TargetContext;

/// Pluggable target selection.
///
/// Implement this trait to decide which cell each agent heads for.
/// Implementations must be deterministic: the same agent and context give
/// the same answer, so a run replays exactly from its seed.
///
/// # Example
///
/// ```
/// use gc_behavior::{TargetContext, TargetModel};
/// use gc_core::{AgentId, Cell, Tick};
///
/// /// Even agents chase the player, odd agents guard the origin.
/// struct Guards;
///
/// impl TargetModel for Guards {
///     fn target(&self, agent: AgentId, ctx: &TargetContext<'_>) -> Option<Cell> {
///         Some(if agent.0 % 2 == 0 { ctx.player } else { Cell::new(0, 0) })
///     }
/// }
///
/// let ctx = TargetContext::new(Tick(0), Cell::new(4, 4), &[]);
/// assert_eq!(Guards.target(AgentId(1), &ctx), Some(Cell::new(0, 0)));
/// ```
pub trait TargetModel {
    /// Cell `agent` should move toward this tick, or `None` to hold.
    fn target(&self, agent: AgentId, ctx: &TargetContext<'_>) -> Option<Cell>;
}

/// Every agent heads for the player's current cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChasePlayer;

impl TargetModel for ChasePlayer {
    #[inline]
    fn target(&self, _agent: AgentId, ctx: &TargetContext<'_>) -> Option<Cell> {
        Some(ctx.player)
    }
}

/// Every agent heads for one fixed cell, whatever the player does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTarget(pub Cell);

impl TargetModel for FixedTarget {
    #[inline]
    fn target(&self, _agent: AgentId, _ctx: &TargetContext<'_>) -> Option<Cell> {
        Some(self.0)
    }
}
