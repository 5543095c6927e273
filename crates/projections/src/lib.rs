//! Read-only views for the storefront client.
//!
//! - [`OrderHistoryView`] lists placed orders and resolves each line to a
//!   name and price, falling back to a placeholder for items that no longer
//!   resolve
//! - [`ConfirmationView`] renders the order just placed from the checkout
//!   handoff
//! - [`ReadModel`] is the query surface both views share

pub mod error;
pub mod read_model;
pub mod source;
pub mod views;

pub use error::{ProjectionError, Result};
pub use read_model::ReadModel;
pub use source::OrderHistorySource;
pub use views::{
    ConfirmationLine, ConfirmationView, OrderHistoryView, OrderLineView, OrderView, UNKNOWN_ITEM,
};
