//! HTTP backend for the storefront.
//!
//! Endpoints, relative to the base URL:
//! - `GET /fruits`: the full inventory
//! - `POST /orders`: place an order, answers with the created order
//! - `GET /orders`: every placed order
//!
//! The server has no push channel over plain HTTP, so inventory changes are
//! picked up by polling `GET /fruits` and treated as full snapshots.

use std::time::Duration;

use async_trait::async_trait;
use checkout::{CheckoutError, OrderGateway, OrderReceipt, OrderRequest};
use common::{Item, OrderRecord};
use futures_util::stream;
use inventory_feed::{
    CartSignal, CartSignalSink, FeedError, InventoryPushSource, InventorySource, PushFrame,
    PushStream,
};
use projections::{OrderHistorySource, ProjectionError};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::time::MissedTickBehavior;

use crate::config::DEFAULT_POLL_INTERVAL;

/// Transport-level failures talking to the backend.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server answered {0}: {1}")]
    Status(u16, String),
    #[error("unexpected response body: {0}")]
    Parse(String),
}

/// Client for the storefront's REST backend.
#[derive(Debug, Clone)]
pub struct HttpStorefrontClient {
    base_url: String,
    client: reqwest::Client,
    poll_interval: Duration,
}

impl HttpStorefrontClient {
    /// Creates a client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets how often inventory is polled once subscribed.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, HttpError> {
        if !resp.status().is_success() {
            return Err(HttpError::Status(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }
        resp.json().await.map_err(|e| HttpError::Parse(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;
        Self::read_json(resp).await
    }

    /// Fetches `GET /fruits`.
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_fruits(&self) -> Result<Vec<Item>, HttpError> {
        self.get_json("/fruits").await
    }

    /// Sends `POST /orders`.
    #[tracing::instrument(skip(self, request), fields(base_url = %self.base_url))]
    pub async fn post_order(&self, request: &OrderRequest) -> Result<OrderReceipt, HttpError> {
        let resp = self
            .client
            .post(self.url("/orders"))
            .json(request)
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;
        Self::read_json(resp).await
    }

    /// Fetches `GET /orders`.
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_orders(&self) -> Result<Vec<OrderRecord>, HttpError> {
        self.get_json("/orders").await
    }
}

#[async_trait]
impl InventorySource for HttpStorefrontClient {
    async fn fetch_inventory(&self) -> inventory_feed::Result<Vec<Item>> {
        self.fetch_fruits()
            .await
            .map_err(|e| FeedError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl InventoryPushSource for HttpStorefrontClient {
    async fn connect(&self) -> inventory_feed::Result<PushStream> {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires at once; skip it so polling starts one interval
        // after the initial load.
        ticker.reset();

        let frames = stream::unfold((self.clone(), ticker), |(client, mut ticker)| async move {
            ticker.tick().await;
            let frame = client
                .get_json::<serde_json::Value>("/fruits")
                .await
                .map(PushFrame::Snapshot)
                .map_err(|e| FeedError::Transport(e.to_string()));
            Some((frame, (client, ticker)))
        });
        Ok(Box::pin(frames))
    }
}

#[async_trait]
impl OrderGateway for HttpStorefrontClient {
    async fn submit(&self, request: OrderRequest) -> checkout::Result<OrderReceipt> {
        self.post_order(&request)
            .await
            .map_err(|e| CheckoutError::SubmissionFailed(e.to_string()))
    }
}

#[async_trait]
impl OrderHistorySource for HttpStorefrontClient {
    async fn list_orders(&self) -> projections::Result<Vec<OrderRecord>> {
        self.fetch_orders()
            .await
            .map_err(|e| ProjectionError::Source(e.to_string()))
    }
}

/// The REST backend takes no cart signals; they are only traced.
impl CartSignalSink for HttpStorefrontClient {
    fn emit(&self, signal: CartSignal) {
        tracing::debug!(
            event = signal.event_name(),
            item_id = %signal.item_id(),
            "cart signal not forwarded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = HttpStorefrontClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/fruits"), "http://localhost:5000/fruits");
    }
}
