//! Cross-cutting error types for rvw.
//!
//! Domain-specific errors (`ApiError`, `AuthError`, `UploadError`, ...) are
//! defined in their respective crates. The CLI converges them through
//! `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any rvw crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// An operation needs a review in a different lifecycle state.
    #[error("Review {id} is {actual}, expected {expected}")]
    UnexpectedStatus {
        id: String,
        actual: String,
        expected: String,
    },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
