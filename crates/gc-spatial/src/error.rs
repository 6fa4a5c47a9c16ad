//! Spatial-subsystem error type.
//!
//! Every variant is a caller contract violation (an invalid request).  An
//! unreachable goal is *not* an error: searches report it as an empty
//! [`Path`][crate::Path].

use thiserror::Error;

use gc_core::Cell;

/// Errors produced by `gc-spatial`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpatialError {
    #[error("cell {cell} lies outside the {rows}x{cols} map")]
    OutOfBounds { cell: Cell, rows: usize, cols: usize },

    #[error("map needs at least one row and one column, got {rows}x{cols}")]
    EmptyMap { rows: usize, cols: usize },

    #[error("map row {row} has {got} cells, expected {expected}")]
    RaggedTable { row: usize, expected: usize, got: usize },

    #[error("{rows}x{cols} map exceeds the addressable grid")]
    TooLarge { rows: usize, cols: usize },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
