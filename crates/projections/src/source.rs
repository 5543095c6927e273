//! Where placed orders are read from.

use async_trait::async_trait;
use checkout::InMemoryOrderStore;
use common::OrderRecord;

use crate::Result;

/// Trait for reading placed orders back from the external order store.
#[async_trait]
pub trait OrderHistorySource: Send + Sync {
    /// Returns every placed order, in the store's order.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>>;
}

#[async_trait]
impl OrderHistorySource for InMemoryOrderStore {
    async fn list_orders(&self) -> Result<Vec<OrderRecord>> {
        Ok(self.orders())
    }
}
