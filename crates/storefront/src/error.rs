//! Session error types.

use checkout::CheckoutError;
use domain::CartError;
use projections::ProjectionError;
use thiserror::Error;

use crate::shell::Route;

/// Errors a session operation can return to the presentation layer.
///
/// None of these end the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The cart rejected the change.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The order could not be started.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// A view could not be built.
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// The operation is not available on the current page.
    #[error("Not available on the {0} page")]
    WrongRoute(Route),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
