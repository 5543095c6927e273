//! In-memory inventory backend for tests and the demo binary.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use common::{Item, ItemId};
use futures_util::stream;
use tokio::sync::broadcast;

use crate::source::{CartSignal, CartSignalSink, InventoryPushSource, InventorySource, PushStream};
use crate::update::{ItemPatch, PushFrame};
use crate::{FeedError, Result};

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Default)]
struct InMemoryInventoryState {
    items: Vec<Item>,
    signals: Vec<CartSignal>,
    fail_on_fetch: bool,
    fail_on_connect: bool,
}

/// In-memory inventory server.
///
/// Serves the catalog over [`InventorySource`], broadcasts changes to every
/// connected [`InventoryPushSource`] stream, and records cart signals.
/// Clones share state.
#[derive(Debug, Clone)]
pub struct InMemoryInventory {
    state: Arc<Mutex<InMemoryInventoryState>>,
    frames: broadcast::Sender<PushFrame>,
}

impl Default for InMemoryInventory {
    fn default() -> Self {
        let (frames, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            state: Arc::default(),
            frames,
        }
    }
}

impl InMemoryInventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inventory listing these items.
    pub fn with_items(items: Vec<Item>) -> Self {
        let inventory = Self::new();
        inventory.lock().items = items;
        inventory
    }

    fn lock(&self) -> MutexGuard<'_, InMemoryInventoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Configures fetches to fail.
    pub fn set_fail_on_fetch(&self, fail: bool) {
        self.lock().fail_on_fetch = fail;
    }

    /// Configures push connections to fail.
    pub fn set_fail_on_connect(&self, fail: bool) {
        self.lock().fail_on_connect = fail;
    }

    /// Returns the current catalog.
    pub fn items(&self) -> Vec<Item> {
        self.lock().items.clone()
    }

    /// Changes an item's stock and pushes the change to subscribers.
    ///
    /// Returns false if the item is not in the catalog.
    pub fn set_stock(&self, item_id: &ItemId, available_quantity: u32) -> bool {
        {
            let mut state = self.lock();
            let Some(item) = state.items.iter_mut().find(|i| &i.id == item_id) else {
                return false;
            };
            item.available_quantity = available_quantity;
        }
        self.push_patches(vec![ItemPatch::stock(item_id.clone(), available_quantity)]);
        true
    }

    /// Adds or replaces an item and pushes it to subscribers.
    pub fn upsert(&self, item: Item) {
        {
            let mut state = self.lock();
            match state.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => *existing = item.clone(),
                None => state.items.push(item.clone()),
            }
        }
        self.push_patches(vec![ItemPatch::from(item)]);
    }

    /// Pushes the whole catalog as a full snapshot.
    pub fn broadcast_snapshot(&self) {
        let items = self.items();
        let payload = serde_json::to_value(items).unwrap_or_default();
        self.push_raw(PushFrame::Snapshot(payload));
    }

    /// Pushes a frame as-is, without touching the catalog.
    pub fn push_raw(&self, frame: PushFrame) {
        // No receivers is fine; nobody is subscribed yet.
        let _ = self.frames.send(frame);
    }

    fn push_patches(&self, patches: Vec<ItemPatch>) {
        let payload = serde_json::to_value(patches).unwrap_or_default();
        self.push_raw(PushFrame::Patch(payload));
    }

    /// Returns the number of open push streams.
    pub fn subscriber_count(&self) -> usize {
        self.frames.receiver_count()
    }

    /// Returns every cart signal received so far.
    pub fn signals(&self) -> Vec<CartSignal> {
        self.lock().signals.clone()
    }
}

#[async_trait]
impl InventorySource for InMemoryInventory {
    async fn fetch_inventory(&self) -> Result<Vec<Item>> {
        let state = self.lock();
        if state.fail_on_fetch {
            return Err(FeedError::Unavailable("inventory server unreachable".to_string()));
        }
        Ok(state.items.clone())
    }
}

#[async_trait]
impl InventoryPushSource for InMemoryInventory {
    async fn connect(&self) -> Result<PushStream> {
        if self.lock().fail_on_connect {
            return Err(FeedError::Transport("push channel refused".to_string()));
        }

        let receiver = self.frames.subscribe();
        let frames = stream::unfold(receiver, |mut receiver| async move {
            match receiver.recv().await {
                Ok(frame) => Some((Ok(frame), receiver)),
                Err(broadcast::error::RecvError::Lagged(skipped)) => Some((
                    Err(FeedError::Transport(format!("{skipped} frames lost"))),
                    receiver,
                )),
                Err(broadcast::error::RecvError::Closed) => None,
            }
        });
        Ok(Box::pin(frames))
    }
}

impl CartSignalSink for InMemoryInventory {
    fn emit(&self, signal: CartSignal) {
        self.lock().signals.push(signal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Money;
    use futures_util::StreamExt;

    fn catalog() -> Vec<Item> {
        vec![
            Item::new("a", "Apple", Money::from_cents(100), 4),
            Item::new("b", "Banana", Money::from_cents(50), 2),
        ]
    }

    #[tokio::test]
    async fn test_fetch_and_fail_toggle() {
        let inventory = InMemoryInventory::with_items(catalog());
        assert_eq!(inventory.fetch_inventory().await.unwrap().len(), 2);

        inventory.set_fail_on_fetch(true);
        assert!(matches!(
            inventory.fetch_inventory().await,
            Err(FeedError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_stock_change_is_pushed() {
        let inventory = InMemoryInventory::with_items(catalog());
        let mut stream = inventory.connect().await.unwrap();
        assert_eq!(inventory.subscriber_count(), 1);

        assert!(inventory.set_stock(&ItemId::new("a"), 1));
        assert!(!inventory.set_stock(&ItemId::new("zz"), 1));

        let frame = stream.next().await.unwrap().unwrap();
        let PushFrame::Patch(payload) = frame else {
            panic!("expected a patch frame");
        };
        assert_eq!(payload[0]["_id"], "a");
        assert_eq!(payload[0]["quantity"], 1);
        assert_eq!(inventory.items()[0].available_quantity, 1);
    }

    #[tokio::test]
    async fn test_connect_failure() {
        let inventory = InMemoryInventory::new();
        inventory.set_fail_on_connect(true);
        assert!(matches!(
            inventory.connect().await,
            Err(FeedError::Transport(_))
        ));
    }

    #[test]
    fn test_signals_recorded() {
        let inventory = InMemoryInventory::new();
        inventory.emit(CartSignal::ItemAdded(ItemId::new("a")));
        inventory.emit(CartSignal::ItemRemoved(ItemId::new("a")));
        assert_eq!(inventory.signals().len(), 2);
    }
}
