//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]` when they surface configuration problems.

use thiserror::Error;

/// The error type for `gc-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `gc-core`.
pub type CoreResult<T> = Result<T, CoreError>;
