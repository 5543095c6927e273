//! In-memory order store for tests and the demo binary.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use common::{ItemId, ItemRef, ItemSnapshot, OrderId, OrderRecord, OrderRecordLine};
use uuid::Uuid;

use crate::error::CheckoutError;
use crate::gateway::{OrderGateway, OrderReceipt};
use crate::request::OrderRequest;
use crate::Result;

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: Vec<OrderRecord>,
    catalog: HashMap<ItemId, ItemSnapshot>,
    fail_on_submit: bool,
    latency: Option<Duration>,
    attempts: u32,
}

/// In-memory order store.
///
/// Records accepted orders and resolves their lines against a catalog the
/// way the real store populates item references. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<InMemoryOrderState>>,
}

impl InMemoryOrderStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that resolves order lines against these items.
    pub fn with_catalog(items: impl IntoIterator<Item = ItemSnapshot>) -> Self {
        let store = Self::new();
        store.write().catalog = items.into_iter().map(|i| (i.id.clone(), i)).collect();
        store
    }

    fn read(&self) -> RwLockReadGuard<'_, InMemoryOrderState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryOrderState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Configures submissions to fail.
    pub fn set_fail_on_submit(&self, fail: bool) {
        self.write().fail_on_submit = fail;
    }

    /// Delays every submission by `latency` before answering.
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.write().latency = latency;
    }

    /// Removes an item from the catalog, so later reads cannot resolve it.
    pub fn forget_item(&self, item_id: &ItemId) {
        let mut state = self.write();
        state.catalog.remove(item_id);
        for line in state.orders.iter_mut().flat_map(|o| o.lines.iter_mut()) {
            if line.item_id() == Some(item_id) {
                line.item = Some(ItemRef::Id(item_id.clone()));
            }
        }
    }

    /// Returns every accepted order, oldest first.
    pub fn orders(&self) -> Vec<OrderRecord> {
        self.read().orders.clone()
    }

    /// Returns the number of accepted orders.
    pub fn order_count(&self) -> usize {
        self.read().orders.len()
    }

    /// Returns the number of submissions received, accepted or not.
    pub fn attempts(&self) -> u32 {
        self.read().attempts
    }
}

#[async_trait]
impl OrderGateway for InMemoryOrderStore {
    async fn submit(&self, request: OrderRequest) -> Result<OrderReceipt> {
        let latency = {
            let mut state = self.write();
            state.attempts += 1;
            state.latency
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let mut state = self.write();
        if state.fail_on_submit {
            return Err(CheckoutError::SubmissionFailed(
                "order store unavailable".to_string(),
            ));
        }

        let lines = request
            .items
            .iter()
            .map(|line| OrderRecordLine {
                item: Some(match state.catalog.get(&line.item_id) {
                    Some(snapshot) => ItemRef::Resolved(snapshot.clone()),
                    None => ItemRef::Id(line.item_id.clone()),
                }),
                quantity: line.quantity,
            })
            .collect();

        let order_id = OrderId::new(Uuid::new_v4().to_string());
        state.orders.push(OrderRecord {
            id: order_id.clone(),
            lines,
            total_cost: request.total_cost,
            created_at: Some(Utc::now()),
        });

        Ok(OrderReceipt { order_id })
    }
}
