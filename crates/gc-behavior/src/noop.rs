//! A target model that never chases anything.

use gc_core::{AgentId, Cell};

use crate::{TargetContext, TargetModel};

/// A [`TargetModel`] that always returns `None`.
///
/// Useful in tests or for decoy agents that simply occupy a cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldPosition;

impl TargetModel for HoldPosition {
    fn target(&self, _agent: AgentId, _ctx: &TargetContext<'_>) -> Option<Cell> {
        None
    }
}
