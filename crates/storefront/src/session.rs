//! One shopper's storefront session.

use std::sync::Arc;

use async_trait::async_trait;
use checkout::{
    CheckoutPipeline, HandoffBuffer, InMemoryOrderStore, OrderGateway, Submission,
    SubmissionState,
};
use common::{Item, ItemId, Money};
use domain::{Cart, CartError, CartLine};
use inventory_feed::{
    CartSignal, CartSignalSink, FeedError, InMemoryInventory, InventoryFeedClient,
    InventoryObserver, InventoryPushSource, InventorySnapshot, InventorySource, Subscription,
};
use projections::{ConfirmationView, OrderHistorySource, OrderHistoryView, OrderView};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Result, SessionError};
use crate::http::HttpStorefrontClient;
use crate::notice::{Notice, NoticeQueue};
use crate::shell::Route;

/// The external collaborators a session talks to.
#[derive(Clone)]
pub struct Backend {
    pub inventory: Arc<dyn InventorySource>,
    pub push: Arc<dyn InventoryPushSource>,
    pub signals: Arc<dyn CartSignalSink>,
    pub orders: Arc<dyn OrderGateway>,
    pub history: Arc<dyn OrderHistorySource>,
}

impl Backend {
    /// Wires a session to in-memory doubles.
    pub fn in_memory(inventory: InMemoryInventory, orders: InMemoryOrderStore) -> Self {
        let inventory = Arc::new(inventory);
        let orders = Arc::new(orders);
        Self {
            inventory: inventory.clone(),
            push: inventory.clone(),
            signals: inventory,
            orders: orders.clone(),
            history: orders,
        }
    }

    /// Wires a session to a REST backend.
    pub fn http(client: HttpStorefrontClient) -> Self {
        let client = Arc::new(client);
        Self {
            inventory: client.clone(),
            push: client.clone(),
            signals: client.clone(),
            orders: client.clone(),
            history: client,
        }
    }
}

/// Reconciles the cart after every applied inventory update.
struct CartReconciler {
    cart: Arc<RwLock<Cart>>,
    notices: NoticeQueue,
}

#[async_trait]
impl InventoryObserver for CartReconciler {
    async fn on_update(&self, snapshot: &InventorySnapshot) {
        let clamped = self.cart.write().await.clamp_to_available(snapshot);
        for notice in clamped {
            self.notices.push(Notice::StaleQuantityClamped(notice));
        }
    }

    async fn on_dropped(&self, error: &FeedError) {
        self.notices.push(Notice::FeedUpdateDropped(error.to_string()));
    }
}

/// A shopper's session: inventory, cart, checkout and the pages around them.
///
/// The session is the only writer of its cart. Cart changes from the shopper
/// and reconciliation after inventory updates all go through one lock, and
/// the inventory snapshot is always locked before the cart.
pub struct StorefrontSession {
    feed: InventoryFeedClient,
    cart: Arc<RwLock<Cart>>,
    signals: Arc<dyn CartSignalSink>,
    checkout: CheckoutPipeline,
    history_source: Arc<dyn OrderHistorySource>,
    history: OrderHistoryView,
    notices: NoticeQueue,
    subscription: Option<Subscription>,
    route: Route,
}

impl StorefrontSession {
    /// Creates a session with an empty cart on the shop page.
    pub fn new(backend: Backend, config: &Config) -> Self {
        let checkout = CheckoutPipeline::new(backend.orders, HandoffBuffer::new())
            .with_timeout(config.submit_timeout);

        Self {
            feed: InventoryFeedClient::new(backend.inventory, backend.push),
            cart: Arc::default(),
            signals: backend.signals,
            checkout,
            history_source: backend.history,
            history: OrderHistoryView::new(),
            notices: NoticeQueue::default(),
            subscription: None,
            route: Route::Shop,
        }
    }

    /// Loads inventory and order history, and starts following stock changes.
    ///
    /// Failures are logged and surfaced as notices; the session stays usable
    /// with whatever loaded.
    #[tracing::instrument(skip(self))]
    pub async fn start(&mut self) {
        if let Err(e) = self.feed.initial_load().await {
            self.notices.push(Notice::FeedUnavailable(e.to_string()));
        }

        if self.subscription.is_none() {
            let observer = Arc::new(CartReconciler {
                cart: Arc::clone(&self.cart),
                notices: self.notices.clone(),
            });
            match self.feed.subscribe(observer).await {
                Ok(subscription) => self.subscription = Some(subscription),
                Err(e) => warn!(error = %e, "continuing without live inventory updates"),
            }
        }

        if let Err(e) = self.refresh_history().await {
            warn!(error = %e, "order history not loaded at start");
        }
        info!(route = %self.route, "session started");
    }

    /// Returns the current page.
    pub fn route(&self) -> Route {
        self.route
    }

    /// Returns the items in stock, in server order.
    pub async fn available_items(&self) -> Vec<Item> {
        self.feed.available().await
    }

    pub async fn cart_lines(&self) -> Vec<CartLine> {
        self.cart.read().await.lines().to_vec()
    }

    pub async fn cart_total(&self) -> Money {
        self.cart.read().await.total()
    }

    /// Adds one unit of a listed item to the cart.
    #[tracing::instrument(skip(self, item_id), fields(item_id = %item_id))]
    pub async fn add_to_cart(&self, item_id: &ItemId) -> Result<()> {
        self.ensure_route(Route::Shop)?;

        // Hold the snapshot while the cart changes so a concurrent stock
        // update cannot clamp the cart in between.
        let snapshot = self.feed.snapshot();
        let snapshot = snapshot.read().await;
        let item = snapshot
            .get(item_id)
            .ok_or_else(|| CartError::UnknownItem(item_id.clone()))?;

        self.cart.write().await.add_in_stock(item)?;
        drop(snapshot);
        self.signals.emit(CartSignal::ItemAdded(item_id.clone()));
        Ok(())
    }

    /// Removes one unit of an item from the cart.
    ///
    /// Returns false if the item was not in the cart.
    #[tracing::instrument(skip(self, item_id), fields(item_id = %item_id))]
    pub async fn remove_from_cart(&self, item_id: &ItemId) -> Result<bool> {
        self.ensure_route(Route::Shop)?;

        let changed = !self.cart.write().await.remove(item_id).is_empty();
        if changed {
            self.signals.emit(CartSignal::ItemRemoved(item_id.clone()));
        }
        Ok(changed)
    }

    /// Places an order for the cart and moves to the confirmation page.
    ///
    /// A submission that falls back still moves to the confirmation page and
    /// raises [`Notice::OrderSubmissionFailed`].
    #[tracing::instrument(skip(self))]
    pub async fn place_order(&mut self) -> Result<Submission> {
        self.ensure_route(Route::Shop)?;

        let submission = self.checkout.place_order(&self.cart).await?;
        if submission.state() == SubmissionState::Fallback {
            let reason = submission
                .failure()
                .map(ToString::to_string)
                .unwrap_or_default();
            self.notices.push(Notice::OrderSubmissionFailed(reason));
        }

        self.route = Route::Success;
        Ok(submission)
    }

    /// Builds the confirmation page from the checkout handoff.
    ///
    /// The handoff is consumed; a second call fails.
    pub fn open_confirmation(&self) -> Result<ConfirmationView> {
        self.ensure_route(Route::Success)?;
        Ok(ConfirmationView::take_from(self.checkout.handoff())?)
    }

    /// Returns to the shop with an empty cart.
    pub async fn back_to_shop(&mut self) {
        self.cart.write().await.clear();
        // An unread confirmation is not shown later.
        self.checkout.handoff().take();
        self.route = Route::Shop;
    }

    /// Moves to the orders page and reloads placed orders.
    ///
    /// If the reload fails, the orders loaded last time are shown.
    pub async fn open_orders(&mut self) -> Vec<OrderView> {
        if let Err(e) = self.refresh_history().await {
            warn!(error = %e, "showing previously loaded orders");
        }
        self.route = Route::Orders;
        self.history.orders().await
    }

    /// Moves to the shop page without touching the cart.
    pub fn open_shop(&mut self) -> Result<()> {
        if self.route == Route::Success {
            return Err(SessionError::WrongRoute(self.route));
        }
        self.route = Route::Shop;
        Ok(())
    }

    /// Removes and returns every pending notice, oldest first.
    pub fn drain_notices(&self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Stops following inventory. Later updates change nothing.
    pub async fn shutdown(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe().await;
        }
        info!("session shut down");
    }

    async fn refresh_history(&self) -> Result<usize> {
        // Resolve against a copy so the feed is not blocked on the fetch.
        let inventory = self.feed.snapshot().read().await.clone();
        Ok(self
            .history
            .refresh(self.history_source.as_ref(), &inventory)
            .await?)
    }

    fn ensure_route(&self, expected: Route) -> Result<()> {
        if self.route == expected {
            Ok(())
        } else {
            Err(SessionError::WrongRoute(self.route))
        }
    }
}
