//! Roster of agent controllers sharing one pathfinder.

use gc_core::{AgentId, Cell};
use gc_spatial::{Pathfinder, TerrainMap};

use crate::{AgentController, MobilityError, MobilityResult, StepOutcome};

/// Wraps a [`Pathfinder`] and every agent's [`AgentController`].
///
/// # Type parameter
///
/// `P` must implement [`Pathfinder`] (e.g. [`gc_spatial::AStarPathfinder`]).
/// Swap it at compile time for a different search with no runtime overhead.
///
/// # Roster
///
/// Slots are indexed by `AgentId` and handed out in registration order.
/// Removing an agent empties its slot; IDs are never reused.
pub struct MobilityEngine<P: Pathfinder> {
    /// The search strategy.
    pub pathfinder: P,

    controllers: Vec<Option<AgentController>>,
}

impl<P: Pathfinder> MobilityEngine<P> {
    pub fn new(pathfinder: P) -> Self {
        Self { pathfinder, controllers: Vec::new() }
    }

    /// Register a new agent standing on `cell`.
    pub fn spawn(&mut self, cell: Cell) -> MobilityResult<AgentId> {
        let id = AgentId::try_from(self.controllers.len())
            .ok()
            .filter(|&id| id != AgentId::INVALID)
            .ok_or(MobilityError::RosterFull)?;
        self.controllers.push(Some(AgentController::new(cell)));
        Ok(id)
    }

    /// Take `agent` out of the roster and return its final state.
    pub fn remove(&mut self, agent: AgentId) -> MobilityResult<AgentController> {
        self.controllers
            .get_mut(agent.index())
            .and_then(Option::take)
            .ok_or(MobilityError::UnknownAgent(agent))
    }

    pub fn get(&self, agent: AgentId) -> MobilityResult<&AgentController> {
        self.controllers
            .get(agent.index())
            .and_then(Option::as_ref)
            .ok_or(MobilityError::UnknownAgent(agent))
    }

    fn get_mut(&mut self, agent: AgentId) -> MobilityResult<&mut AgentController> {
        self.controllers
            .get_mut(agent.index())
            .and_then(Option::as_mut)
            .ok_or(MobilityError::UnknownAgent(agent))
    }

    /// Teleport `agent` to `cell` (see [`AgentController::place`]).
    pub fn place(&mut self, agent: AgentId, cell: Cell) -> MobilityResult<()> {
        self.get_mut(agent)?.place(cell);
        Ok(())
    }

    /// Run one controller tick for `agent` toward `target`.
    ///
    /// Agents are independent: ticking one never reads or writes another's
    /// cached route.
    pub fn tick_agent<M: TerrainMap + ?Sized>(
        &mut self,
        agent:  AgentId,
        map:    &M,
        target: Option<Cell>,
    ) -> MobilityResult<StepOutcome> {
        // Split borrow: pathfinder and roster are separate fields.
        let pathfinder = &self.pathfinder;
        let controller = self.controllers
            .get_mut(agent.index())
            .and_then(Option::as_mut)
            .ok_or(MobilityError::UnknownAgent(agent))?;
        Ok(controller.tick(pathfinder, map, target)?)
    }

    /// Live agents in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &AgentController)> + '_ {
        self.controllers
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (AgentId(i as u32), c)))
    }

    /// IDs of live agents in registration order.
    pub fn ids(&self) -> Vec<AgentId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Number of live agents.
    pub fn len(&self) -> usize {
        self.controllers.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Searches run by all live agents since they spawned.
    pub fn total_replans(&self) -> u64 {
        self.iter().map(|(_, c)| c.replans()).sum()
    }

    /// Live agent standing on `cell`, lowest ID first.
    pub fn agent_at(&self, cell: Cell) -> Option<AgentId> {
        self.iter().find(|(_, c)| c.position() == cell).map(|(id, _)| id)
    }
}
