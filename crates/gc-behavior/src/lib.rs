//! `gc-behavior` - per-agent target selection.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`context`] | `TargetContext<'a>` - read-only tick snapshot shared by all agents |
//! | [`model`]   | `TargetModel` trait, `ChasePlayer`, `FixedTarget`               |
//! | [`noop`]    | `HoldPosition` - never picks a target                           |
//!
//! # Design notes
//!
//! The sim asks the model for every live agent's target once per tick, in
//! registration order, before that agent's controller runs.  Models only see
//! `&TargetContext`, so they cannot disturb the roster or another agent's
//! cached route.  A `None` target makes the agent hold its cell.

pub mod context;
pub mod model;
pub mod noop;


pub use context::TargetContext;
pub use model::{ChasePlayer, FixedTarget, TargetModel};
pub use noop::HoldPosition;
