//! Inventory items as the server reports them.

use serde::{Deserialize, Serialize};

use crate::{ItemId, Money};

/// A sellable unit with its current stock level.
///
/// Only inventory feed updates change an `Item`; the cart keeps its own
/// copy of the price at add-time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// Price per unit.
    #[serde(rename = "price", with = "crate::money::decimal")]
    pub unit_price: Money,

    /// Units currently in stock.
    #[serde(rename = "quantity")]
    pub available_quantity: u32,
}

impl Item {
    /// Creates a new item.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        unit_price: Money,
        available_quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            available_quantity,
        }
    }

    /// Returns true if at least one unit is in stock.
    pub fn is_available(&self) -> bool {
        self.available_quantity > 0
    }

    /// Returns the display projection of this item.
    pub fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.unit_price,
        }
    }
}

/// Name and price of an item, without stock.
///
/// This is what order history lines resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    #[serde(rename = "_id", alias = "id")]
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "price", with = "crate::money::decimal")]
    pub unit_price: Money,
}
