//! The record of one order submission.

use chrono::{DateTime, Utc};
use common::{Money, OrderId};
use domain::CartLine;

use crate::error::CheckoutError;
use crate::state::SubmissionState;
use crate::Result;

/// Tracks one pass through the submission state machine.
///
/// Transitions that the state does not allow are rejected with
/// [`CheckoutError::InvalidState`] and leave the record unchanged.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    state: SubmissionState,
    lines: Vec<CartLine>,
    total: Money,
    order_id: Option<OrderId>,
    failure: Option<CheckoutError>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl Submission {
    /// Creates an idle submission.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Returns the lines that were ordered.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Returns the order id, once committed.
    pub fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    /// Returns why the submission fell back, if it did.
    pub fn failure(&self) -> Option<&CheckoutError> {
        self.failure.as_ref()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Returns true once the order store accepted the order.
    pub fn is_committed(&self) -> bool {
        self.state == SubmissionState::Committed
    }

    /// Idle → Submitting, recording what is being ordered.
    pub fn begin(&mut self, lines: Vec<CartLine>) -> Result<()> {
        if !self.state.can_begin() {
            return Err(CheckoutError::InvalidState {
                expected: SubmissionState::Idle,
                actual: self.state,
            });
        }
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.total = lines.iter().map(CartLine::line_total).sum();
        self.lines = lines;
        self.state = SubmissionState::Submitting;
        self.started_at = Some(Utc::now());
        Ok(())
    }

    /// Submitting → Committed.
    pub fn commit(&mut self, order_id: OrderId) -> Result<()> {
        self.ensure_resolvable()?;
        self.order_id = Some(order_id);
        self.finish(SubmissionState::Committed);
        Ok(())
    }

    /// Submitting → Fallback. The cart is not restored.
    pub fn fall_back(&mut self, reason: CheckoutError) -> Result<()> {
        self.ensure_resolvable()?;
        self.failure = Some(reason);
        self.finish(SubmissionState::Fallback);
        Ok(())
    }

    fn ensure_resolvable(&self) -> Result<()> {
        if self.state.can_resolve() {
            Ok(())
        } else {
            Err(CheckoutError::InvalidState {
                expected: SubmissionState::Submitting,
                actual: self.state,
            })
        }
    }

    fn finish(&mut self, state: SubmissionState) {
        self.state = state;
        self.finished_at = Some(Utc::now());
    }
}
