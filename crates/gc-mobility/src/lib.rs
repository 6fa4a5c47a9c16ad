//! `gc-mobility` - per-agent path following, route caching, and replanning.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`controller`] | `AgentController`, `ControllerPhase`, `StepOutcome`          |
//! | [`engine`]     | `MobilityEngine<P>` - roster of controllers + pathfinder     |
//! | [`error`]      | `MobilityError`, `MobilityResult<T>`                         |
//!
//! # Movement model (one cell per tick)
//!
//! 1. The sim hands each controller its live target once per tick.
//! 2. If the cached route still applies (same goal, agent on its head) the
//!    controller steps to the next cell.
//! 3. Otherwise it searches from its current cell through the pluggable
//!    [`Pathfinder`][gc_spatial::Pathfinder], caches the result tagged with
//!    the goal, and takes the first step in the same tick.
//! 4. On an unreachable result the agent holds and retries next tick.
//!
//! A target that stays put costs exactly one search; every later tick is a
//! cache hit, including ticks spent standing on the target.

pub mod controller;
pub mod engine;
pub mod error;


pub use controller::{AgentController, ControllerPhase, StepOutcome};
pub use engine::MobilityEngine;
pub use error::{MobilityError, MobilityResult};
