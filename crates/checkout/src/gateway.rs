//! The order store seam.

use async_trait::async_trait;
use common::OrderId;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::request::OrderRequest;

/// What the order store hands back for an accepted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    #[serde(rename = "_id", alias = "id")]
    pub order_id: OrderId,
}

/// Trait for submitting orders to the external order store.
///
/// Any failure, including a non-success response, is reported as
/// [`crate::CheckoutError::SubmissionFailed`].
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Sends an order and waits for the store's answer.
    async fn submit(&self, request: OrderRequest) -> Result<OrderReceipt>;
}
