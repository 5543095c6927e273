//! Inventory feed error types.

use thiserror::Error;

/// Errors that can occur while loading or applying inventory.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The initial inventory request failed.
    #[error("Inventory unavailable: {0}")]
    Unavailable(String),

    /// A pushed update could not be parsed or applied; the prior snapshot is kept.
    #[error("Inventory update dropped: {0}")]
    UpdateDropped(String),

    /// The push channel failed to connect or reported an error.
    #[error("Push channel error: {0}")]
    Transport(String),
}

/// Result type for inventory feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
