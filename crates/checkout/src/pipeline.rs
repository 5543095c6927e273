//! The checkout pipeline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use domain::Cart;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};

use crate::error::CheckoutError;
use crate::gateway::OrderGateway;
use crate::handoff::{Handoff, HandoffBuffer};
use crate::request::OrderRequest;
use crate::state::SubmissionState;
use crate::submission::Submission;
use crate::Result;

/// How long the order store gets to answer before the submission falls back.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Turns the cart into an order and drives the submission to a terminal state.
pub struct CheckoutPipeline {
    gateway: Arc<dyn OrderGateway>,
    handoff: HandoffBuffer,
    timeout: Duration,
    in_flight: Mutex<()>,
}

impl CheckoutPipeline {
    /// Creates a pipeline with the default submission timeout.
    pub fn new(gateway: Arc<dyn OrderGateway>, handoff: HandoffBuffer) -> Self {
        Self {
            gateway,
            handoff,
            timeout: DEFAULT_SUBMIT_TIMEOUT,
            in_flight: Mutex::new(()),
        }
    }

    /// Sets the submission timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the buffer the confirmation view reads from.
    pub fn handoff(&self) -> &HandoffBuffer {
        &self.handoff
    }

    /// Places an order for everything in the cart.
    ///
    /// The cart is copied and cleared under its write lock, and the copy is
    /// written to the handoff buffer, before the order store is called. The
    /// returned submission is always terminal: `Committed` if the store
    /// accepted the order, `Fallback` if it failed or did not answer within
    /// the timeout. Fallback never restores the cart and never retries.
    ///
    /// Fails without side effects if the cart is empty or another
    /// submission is still in flight.
    #[tracing::instrument(skip(self, cart), fields(timeout_ms = self.timeout.as_millis() as u64))]
    pub async fn place_order(&self, cart: &RwLock<Cart>) -> Result<Submission> {
        let _in_flight = self.in_flight.try_lock().map_err(|_| CheckoutError::InvalidState {
            expected: SubmissionState::Idle,
            actual: SubmissionState::Submitting,
        })?;

        let mut submission = Submission::new();
        let request = {
            let mut cart = cart.write().await;
            if cart.is_empty() {
                return Err(CheckoutError::EmptyCart);
            }
            let lines = cart.lines().to_vec();
            let request = OrderRequest::from_lines(&lines);
            submission.begin(lines)?;
            cart.clear();
            request
        };
        self.handoff.put(Handoff::new(submission.lines().to_vec()));

        metrics::counter!("checkout_submissions_total").increment(1);
        info!(
            lines = request.items.len(),
            total = %request.total_cost,
            state = %submission.state(),
            "order submission started"
        );
        let started = Instant::now();

        let outcome = match tokio::time::timeout(self.timeout, self.gateway.submit(request)).await {
            Ok(result) => result,
            Err(_) => Err(CheckoutError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(receipt) => {
                info!(order_id = %receipt.order_id, "order committed");
                metrics::counter!("checkout_committed_total").increment(1);
                submission.commit(receipt.order_id)?;
            }
            Err(e) => {
                error!(error = %e, "order submission failed; cart stays cleared");
                metrics::counter!("checkout_fallback_total").increment(1);
                submission.fall_back(e)?;
            }
        }

        metrics::histogram!("checkout_duration_seconds", "state" => submission.state().as_str())
            .record(started.elapsed().as_secs_f64());

        Ok(submission)
    }
}
