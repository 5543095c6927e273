//! Transport seams for the inventory feed.

use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use common::{Item, ItemId};
use futures_core::Stream;

use crate::Result;
use crate::update::PushFrame;

/// A stream of pushed frames, in the order the server sent them.
pub type PushStream = Pin<Box<dyn Stream<Item = Result<PushFrame>> + Send>>;

/// Request/response access to the full inventory list.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Fetches every item the server currently lists.
    async fn fetch_inventory(&self) -> Result<Vec<Item>>;
}

/// Server-push access to inventory changes.
#[async_trait]
pub trait InventoryPushSource: Send + Sync {
    /// Opens the push channel.
    async fn connect(&self) -> Result<PushStream>;
}

/// Advisory cart activity sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartSignal {
    ItemAdded(ItemId),
    ItemRemoved(ItemId),
}

impl CartSignal {
    /// Returns the event name used on the push channel.
    pub fn event_name(&self) -> &'static str {
        match self {
            CartSignal::ItemAdded(_) => "addToCart",
            CartSignal::ItemRemoved(_) => "removeFromCart",
        }
    }

    pub fn item_id(&self) -> &ItemId {
        match self {
            CartSignal::ItemAdded(id) | CartSignal::ItemRemoved(id) => id,
        }
    }
}

impl fmt::Display for CartSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.event_name(), self.item_id())
    }
}

/// Fire-and-forget sink for [`CartSignal`]s.
///
/// Signals never change the local cart and carry no acknowledgement, so
/// implementations must not block or fail loudly.
pub trait CartSignalSink: Send + Sync {
    fn emit(&self, signal: CartSignal);
}
