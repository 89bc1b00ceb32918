//! Assignment error types.

use thiserror::Error;

/// Errors that can occur while computing an assignment.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("assignment cancelled")]
    Cancelled,

    #[error("internal invariant violated: {0}")]
    Internal(String),
}

pub type PlacementResult<T> = Result<T, PlacementError>;
