//! Order submission for the storefront client.
//!
//! The pipeline turns the cart into an order request and drives a small
//! state machine to a terminal state:
//!
//! ```text
//! Idle ──► Submitting ──┬──► Committed
//!                       └──► Fallback
//! ```
//!
//! The cart is cleared and the handoff buffer written before the gateway is
//! called. Both terminal states leave a confirmation to show; nothing retries.

pub mod error;
pub mod gateway;
pub mod handoff;
pub mod memory;
pub mod pipeline;
pub mod request;
pub mod state;
pub mod submission;

pub use error::{CheckoutError, Result};
pub use gateway::{OrderGateway, OrderReceipt};
pub use handoff::{HANDOFF_KEY, Handoff, HandoffBuffer};
pub use memory::InMemoryOrderStore;
pub use pipeline::{CheckoutPipeline, DEFAULT_SUBMIT_TIMEOUT};
pub use request::{OrderRequest, OrderRequestLine};
pub use state::SubmissionState;
pub use submission::Submission;
