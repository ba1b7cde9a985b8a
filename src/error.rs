//! Error types for the verse annotator
//!
//! Rendering never fails on data-shape problems; those degrade to "ignored".
//! Errors here are reserved for contract violations at the API edge.

use thiserror::Error;

use crate::position::PositionError;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Selection error: {0}")]
    Position(#[from] PositionError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
