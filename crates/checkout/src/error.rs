//! Checkout error types.

use std::time::Duration;

use thiserror::Error;

use crate::state::SubmissionState;

/// Errors that can occur while placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("Cannot place an order with an empty cart")]
    EmptyCart,

    /// The submission is in the wrong state for the requested transition.
    #[error("Invalid submission state: expected {expected}, actual {actual}")]
    InvalidState {
        expected: SubmissionState,
        actual: SubmissionState,
    },

    /// The order store rejected the request or could not be reached.
    #[error("Order submission failed: {0}")]
    SubmissionFailed(String),

    /// The order store did not answer in time.
    #[error("Order submission timed out after {0:?}")]
    Timeout(Duration),
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
