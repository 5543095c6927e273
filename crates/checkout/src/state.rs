//! Submission state machine.

use serde::{Deserialize, Serialize};

/// The state of an order submission.
///
/// State transitions:
/// ```text
/// Idle ──► Submitting ──┬──► Committed
///                       └──► Fallback
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SubmissionState {
    /// Nothing has been sent yet.
    #[default]
    Idle,

    /// The cart has been spent and the request is in flight.
    Submitting,

    /// The order store accepted the order (terminal state).
    Committed,

    /// The request failed or timed out; the cart stays cleared (terminal state).
    Fallback,
}

impl SubmissionState {
    /// Returns true if a submission can start from this state.
    pub fn can_begin(&self) -> bool {
        matches!(self, SubmissionState::Idle)
    }

    /// Returns true if an outcome can be recorded in this state.
    pub fn can_resolve(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Committed | SubmissionState::Fallback)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "Idle",
            SubmissionState::Submitting => "Submitting",
            SubmissionState::Committed => "Committed",
            SubmissionState::Fallback => "Fallback",
        }
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
