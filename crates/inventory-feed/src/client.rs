//! The inventory feed client and its subscription handle.

use std::sync::Arc;

use async_trait::async_trait;
use common::Item;
use futures_util::StreamExt;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::snapshot::InventorySnapshot;
use crate::source::{InventoryPushSource, InventorySource, PushStream};
use crate::update::InventoryUpdate;
use crate::{FeedError, Result};

/// Receives the snapshot after every applied push update.
///
/// Callbacks run on the feed's consumer task while the snapshot is read-locked,
/// so they see exactly the state the update produced. Use the snapshot passed
/// in rather than reading it back through the client.
#[async_trait]
pub trait InventoryObserver: Send + Sync {
    /// Called after an update has been applied.
    async fn on_update(&self, snapshot: &InventorySnapshot);

    /// Called when a pushed update was skipped.
    async fn on_dropped(&self, _error: &FeedError) {}
}

/// Keeps the freshest known inventory and applies pushed updates to it.
#[derive(Clone)]
pub struct InventoryFeedClient {
    source: Arc<dyn InventorySource>,
    push: Arc<dyn InventoryPushSource>,
    snapshot: Arc<RwLock<InventorySnapshot>>,
}

impl InventoryFeedClient {
    /// Creates a client with an empty snapshot.
    pub fn new(source: Arc<dyn InventorySource>, push: Arc<dyn InventoryPushSource>) -> Self {
        Self {
            source,
            push,
            snapshot: Arc::default(),
        }
    }

    /// Fetches the full inventory once and replaces the snapshot with it.
    ///
    /// On failure the snapshot is left untouched and the error is returned
    /// as [`FeedError::Unavailable`].
    #[tracing::instrument(skip(self))]
    pub async fn initial_load(&self) -> Result<Vec<Item>> {
        let items = match self.source.fetch_inventory().await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "initial inventory load failed");
                return Err(match e {
                    FeedError::Unavailable(reason) => FeedError::Unavailable(reason),
                    other => FeedError::Unavailable(other.to_string()),
                });
            }
        };

        let mut snapshot = self.snapshot.write().await;
        snapshot.apply(InventoryUpdate::full(items.clone()))?;
        info!(items = items.len(), "inventory loaded");
        Ok(items)
    }

    /// Opens the push channel and starts applying updates.
    ///
    /// Frames are applied one at a time, in receipt order, by a single
    /// consumer task. Each applied frame is followed by
    /// [`InventoryObserver::on_update`].
    #[tracing::instrument(skip_all)]
    pub async fn subscribe(&self, observer: Arc<dyn InventoryObserver>) -> Result<Subscription> {
        let frames = self.push.connect().await.inspect_err(|e| {
            warn!(error = %e, "inventory push channel unavailable");
        })?;

        let live = Arc::new(RwLock::new(true));
        let task = tokio::spawn(consume(
            frames,
            Arc::clone(&self.snapshot),
            Arc::clone(&live),
            observer,
        ));
        debug!("subscribed to inventory updates");

        Ok(Subscription {
            live,
            task: Some(task),
        })
    }

    /// Returns the items currently in stock, in server order.
    pub async fn available(&self) -> Vec<Item> {
        self.snapshot.read().await.available()
    }

    /// Returns the shared snapshot.
    ///
    /// Callers that also lock a cart must take this lock first.
    pub fn snapshot(&self) -> Arc<RwLock<InventorySnapshot>> {
        Arc::clone(&self.snapshot)
    }
}

async fn consume(
    mut frames: PushStream,
    snapshot: Arc<RwLock<InventorySnapshot>>,
    live: Arc<RwLock<bool>>,
    observer: Arc<dyn InventoryObserver>,
) {
    while let Some(next) = frames.next().await {
        // Held until the observer returns; unsubscribe waits on it.
        let alive = live.read().await;
        if !*alive {
            break;
        }

        // Parse before locking so a malformed frame never takes the write lock.
        let update = match next.and_then(|frame| InventoryUpdate::parse(&frame)) {
            Ok(update) => update,
            Err(e) => {
                report_dropped(observer.as_ref(), &e).await;
                continue;
            }
        };

        let kind = update.kind;
        let mut guard = snapshot.write().await;
        match guard.apply(update) {
            Ok(applied) => {
                metrics::counter!("inventory_feed_updates_applied_total", "kind" => kind.as_str())
                    .increment(1);
                debug!(
                    kind = kind.as_str(),
                    upserted = applied.upserted,
                    retired = applied.retired,
                    "inventory update applied"
                );
                let guard = guard.downgrade();
                observer.on_update(&guard).await;
            }
            Err(e) => {
                drop(guard);
                report_dropped(observer.as_ref(), &e).await;
            }
        }
    }
    debug!("inventory push stream closed");
}

async fn report_dropped(observer: &dyn InventoryObserver, error: &FeedError) {
    warn!(error = %error, "inventory update dropped");
    metrics::counter!("inventory_feed_updates_dropped_total").increment(1);
    observer.on_dropped(error).await;
}

/// Handle to an active push subscription.
///
/// Dropping the handle stops the consumer task without waiting for it.
#[derive(Debug)]
pub struct Subscription {
    live: Arc<RwLock<bool>>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Stops delivery. Safe to call more than once.
    ///
    /// Waits for an update that is already being applied to finish; once this
    /// returns, no further update touches the snapshot.
    pub async fn unsubscribe(&mut self) {
        *self.live.write().await = false;
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("unsubscribed from inventory updates");
        }
    }

    /// Returns true until [`Subscription::unsubscribe`] has been called.
    pub async fn is_active(&self) -> bool {
        *self.live.read().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
