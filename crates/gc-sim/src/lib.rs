//! `gc-sim` - tick loop orchestrator for the gridchase engine.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Targets  - TargetModel::target for each live agent, registration order.
//!   ② Move     - the agent's controller: reuse the cached route or search,
//!                then advance at most one cell.
//!   ③ Detect   - agents on the player's cell → SimEvent::TargetReached.
//!   ④ Report   - Frame to the FrameSink on frame ticks and terminal ticks.
//! ```
//!
//! `Sim::run` stops at the first `TargetReached` or at `config.end_tick()`.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`sim`]     | `Sim<M, T, P>` - state + tick loop                        |
//! | [`builder`] | `SimBuilder` - validation, random spawns                  |
//! | [`sink`]    | `FrameSink` trait, `Frame`, `AgentFrame`, `Markers`       |
//! | [`event`]   | `SimEvent`, `TickReport`, `RunOutcome`                    |
//! | [`error`]   | `SimError`, `SimResult<T>`                                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gc_behavior::ChasePlayer;
//! use gc_sim::{NoopSink, SimBuilder};
//! use gc_spatial::{AStarPathfinder, GridMap};
//!
//! let map = GridMap::from_table(&table)?;
//! let mut sim = SimBuilder::new(config, map, ChasePlayer, AStarPathfinder)
//!     .spawn_random(3)
//!     .build()?;
//! let outcome = sim.run(&mut NoopSink)?;
//! ```

pub mod builder;
pub mod error;
pub mod event;
pub mod sim;
pub mod sink;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use event::{RunOutcome, SimEvent, TickReport};
pub use sim::Sim;
pub use sink::{AgentFrame, Frame, FrameSink, Markers, NoopSink};
