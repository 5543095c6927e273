//! Cart domain events.

use common::{ItemId, Money};
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

/// Events that can occur on the cart aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CartEvent {
    /// A new line was created with quantity 1.
    LineAdded(LineAddedData),

    /// An existing line's quantity changed (never to zero).
    QuantityChanged(QuantityChangedData),

    /// A line left the cart.
    LineRemoved(LineRemovedData),

    /// Every line was dropped.
    Cleared,
}

impl DomainEvent for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::LineAdded(_) => "LineAdded",
            CartEvent::QuantityChanged(_) => "QuantityChanged",
            CartEvent::LineRemoved(_) => "LineRemoved",
            CartEvent::Cleared => "Cleared",
        }
    }
}

impl CartEvent {
    /// Creates a LineAdded event.
    pub fn line_added(item_id: ItemId, name: impl Into<String>, snapshot_price: Money) -> Self {
        CartEvent::LineAdded(LineAddedData {
            item_id,
            name: name.into(),
            snapshot_price,
        })
    }

    /// Creates a QuantityChanged event.
    pub fn quantity_changed(item_id: ItemId, old_quantity: u32, new_quantity: u32) -> Self {
        CartEvent::QuantityChanged(QuantityChangedData {
            item_id,
            old_quantity,
            new_quantity,
        })
    }

    /// Creates a LineRemoved event.
    pub fn line_removed(item_id: ItemId, quantity: u32) -> Self {
        CartEvent::LineRemoved(LineRemovedData { item_id, quantity })
    }

    /// Returns the item this event concerns, if it concerns a single item.
    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            CartEvent::LineAdded(data) => Some(&data.item_id),
            CartEvent::QuantityChanged(data) => Some(&data.item_id),
            CartEvent::LineRemoved(data) => Some(&data.item_id),
            CartEvent::Cleared => None,
        }
    }
}

/// Data for LineAdded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAddedData {
    pub item_id: ItemId,
    pub name: String,
    /// Unit price captured at add-time.
    pub snapshot_price: Money,
}

/// Data for QuantityChanged event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChangedData {
    pub item_id: ItemId,
    pub old_quantity: u32,
    pub new_quantity: u32,
}

/// Data for LineRemoved event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRemovedData {
    pub item_id: ItemId,
    /// Quantity the line held when it was removed.
    pub quantity: u32,
}
