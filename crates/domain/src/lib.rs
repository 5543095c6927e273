//! Domain layer for the storefront client.
//!
//! This crate provides the cart aggregate:
//! - [`Aggregate`] and [`DomainEvent`] traits for decide/apply state changes
//! - [`Cart`], the single source of truth for the shopper's selection
//! - Reconciliation of cart lines against the latest known stock levels

pub mod aggregate;
pub mod cart;
pub mod error;

pub use aggregate::{Aggregate, DomainEvent};
pub use cart::{
    Cart, CartEvent, CartLine, ClampNotice, LineAddedData, LineRemovedData, QuantityChangedData,
};
pub use error::CartError;
