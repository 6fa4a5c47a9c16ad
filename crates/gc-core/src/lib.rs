//! `gc-core` - foundational types for the `gridchase` pursuit engine.
//!
//! This crate is a dependency of every other `gc-*` crate.  It intentionally
//! has no `gc-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`cell`]        | `Cell`, Manhattan distance, 4-neighbourhood           |
//! | [`direction`]   | `Direction` enum (up, down, left, right)              |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng` (seeded, simulation-level)                   |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on public types (JSON configs).  |

pub mod cell;
pub mod direction;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::Cell;
pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use ids::AgentId;
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
