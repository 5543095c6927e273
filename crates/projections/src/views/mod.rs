//! Read model view implementations.

pub mod confirmation;
pub mod order_history;

pub use confirmation::{ConfirmationLine, ConfirmationView};
pub use order_history::{OrderHistoryView, OrderLineView, OrderView, UNKNOWN_ITEM};
