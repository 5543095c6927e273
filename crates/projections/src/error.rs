//! Projection error types.

use thiserror::Error;

/// Errors that can occur while building read models.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// The order history could not be fetched; the previous list is kept.
    #[error("Order history unavailable: {0}")]
    Source(String),

    /// There was no handoff to build a confirmation from.
    #[error("No order to confirm")]
    NoHandoff,
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
