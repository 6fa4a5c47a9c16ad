//! `gc-spatial` - terrain maps, priority frontier, and path search.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`grid`]     | `TerrainMap` trait, `GridMap` (dense + R-tree), `GridMapBuilder` |
//! | [`frontier`] | `PriorityFrontier` - min-priority open list                |
//! | [`search`]   | `Pathfinder` trait, `Path`, `AStarPathfinder`, `find_path` |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod frontier;
pub mod grid;
pub mod search;


pub use error::{SpatialError, SpatialResult};
pub use frontier::PriorityFrontier;
pub use grid::{GridMap, GridMapBuilder, TerrainMap};
pub use search::{find_path, AStarPathfinder, Path, Pathfinder};
