//! Order history read model: every placed order, resolved for display.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::{ItemId, ItemLookup, Money, OrderId, OrderRecord, OrderRecordLine};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::Result;
use crate::read_model::ReadModel;
use crate::source::OrderHistorySource;

/// Shown in place of an item that no longer resolves.
pub const UNKNOWN_ITEM: &str = "Unknown item";

/// One resolved line of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLineView {
    /// The referenced item, if the store kept a reference at all.
    pub item_id: Option<ItemId>,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    /// False when the line shows the placeholder.
    pub resolved: bool,
}

impl OrderLineView {
    fn resolve<L>(line: &OrderRecordLine, lookup: &L) -> Self
    where
        L: ItemLookup + ?Sized,
    {
        let item_id = line.item_id().cloned();
        let snapshot = line
            .resolved()
            .cloned()
            .or_else(|| item_id.as_ref().and_then(|id| lookup.lookup(id)));

        match snapshot {
            Some(snapshot) => Self {
                item_id,
                name: snapshot.name,
                unit_price: snapshot.unit_price,
                quantity: line.quantity,
                resolved: true,
            },
            None => Self {
                item_id,
                name: UNKNOWN_ITEM.to_string(),
                unit_price: Money::zero(),
                quantity: line.quantity,
                resolved: false,
            },
        }
    }

    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

impl std::fmt::Display for OrderLineView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} × {}", self.name, self.quantity)
    }
}

/// A placed order as the history page shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderView {
    pub order_id: OrderId,
    pub lines: Vec<OrderLineView>,
    /// The total the store recorded, not recomputed from resolved prices.
    pub total_cost: Money,
    pub created_at: Option<DateTime<Utc>>,
}

impl OrderView {
    /// Builds the view of one order.
    pub fn from_record<L>(record: &OrderRecord, lookup: &L) -> Self
    where
        L: ItemLookup + ?Sized,
    {
        Self {
            order_id: record.id.clone(),
            lines: record
                .lines
                .iter()
                .map(|line| OrderLineView::resolve(line, lookup))
                .collect(),
            total_cost: record.total_cost,
            created_at: record.created_at,
        }
    }

    /// Returns the number of lines showing the placeholder.
    pub fn unresolved_count(&self) -> usize {
        self.lines.iter().filter(|line| !line.resolved).count()
    }
}

#[derive(Debug, Default)]
struct OrderHistoryState {
    orders: Vec<OrderView>,
    last_refreshed: Option<DateTime<Utc>>,
}

/// Read model view for placed orders.
///
/// Each refresh replaces the whole list. A failed refresh keeps the last
/// list that loaded.
#[derive(Clone, Default)]
pub struct OrderHistoryView {
    state: Arc<RwLock<OrderHistoryState>>,
}

impl OrderHistoryView {
    /// Creates a new empty order history view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches every order and rebuilds the view.
    ///
    /// Lines resolve from the item the store embedded, then from `lookup`
    /// (usually the current inventory), and otherwise show [`UNKNOWN_ITEM`]
    /// at a zero price. Returns the number of orders loaded.
    #[tracing::instrument(skip_all)]
    pub async fn refresh<L>(&self, source: &dyn OrderHistorySource, lookup: &L) -> Result<usize>
    where
        L: ItemLookup + Sync + ?Sized,
    {
        let records = source.list_orders().await.inspect_err(|e| {
            warn!(error = %e, "order history refresh failed; keeping previous list");
        })?;
        Ok(self.load(&records, lookup).await)
    }

    /// Rebuilds the view from records already fetched.
    pub async fn load<L>(&self, records: &[OrderRecord], lookup: &L) -> usize
    where
        L: ItemLookup + ?Sized,
    {
        let orders: Vec<OrderView> = records
            .iter()
            .map(|record| OrderView::from_record(record, lookup))
            .collect();

        let unresolved: usize = orders.iter().map(OrderView::unresolved_count).sum();
        if unresolved > 0 {
            debug!(unresolved, "order lines shown as unknown items");
        }

        let mut state = self.state.write().await;
        state.orders = orders;
        state.last_refreshed = Some(Utc::now());
        state.orders.len()
    }

    /// Gets all orders, in the store's order.
    pub async fn orders(&self) -> Vec<OrderView> {
        self.state.read().await.orders.clone()
    }

    /// Gets one order.
    pub async fn get_order(&self, order_id: &OrderId) -> Option<OrderView> {
        self.state
            .read()
            .await
            .orders
            .iter()
            .find(|order| &order.order_id == order_id)
            .cloned()
    }

    /// Returns when the view last loaded successfully.
    pub async fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_refreshed
    }
}

impl ReadModel for OrderHistoryView {
    fn name(&self) -> &'static str {
        "OrderHistoryView"
    }

    fn count(&self) -> usize {
        self.state.try_read().map(|s| s.orders.len()).unwrap_or(0)
    }
}
