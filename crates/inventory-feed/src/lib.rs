//! Inventory feed client for the storefront.
//!
//! Keeps the freshest known stock snapshot:
//! - [`InventoryFeedClient::initial_load`] fetches the full list once
//! - [`InventoryFeedClient::subscribe`] applies pushed updates in receipt order
//!   on a single consumer task and notifies an [`InventoryObserver`]
//! - [`Subscription::unsubscribe`] stops delivery; nothing mutates afterwards
//!
//! The transports are seams ([`InventorySource`], [`InventoryPushSource`],
//! [`CartSignalSink`]) with an in-memory implementation for tests and demos.

pub mod client;
pub mod error;
pub mod memory;
pub mod snapshot;
pub mod source;
pub mod update;

pub use client::{InventoryFeedClient, InventoryObserver, Subscription};
pub use error::{FeedError, Result};
pub use memory::InMemoryInventory;
pub use snapshot::{AppliedUpdate, InventorySnapshot};
pub use source::{CartSignal, CartSignalSink, InventoryPushSource, InventorySource, PushStream};
pub use update::{InventoryUpdate, ItemPatch, PushFrame, UpdateKind};
