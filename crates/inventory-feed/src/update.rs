//! Pushed inventory updates.

use common::{Item, ItemId, Money};
use serde::{Deserialize, Serialize};

use crate::{FeedError, Result};

/// A raw event from the push channel.
///
/// The payload stays untyped until the client parses it, so a malformed
/// event is dropped by the client rather than by the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum PushFrame {
    /// The full current inventory.
    Snapshot(serde_json::Value),
    /// Changes to some items only.
    Patch(serde_json::Value),
}

/// Whether an update replaces the whole inventory or only touches some items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Full,
    Partial,
}

impl UpdateKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateKind::Full => "full",
            UpdateKind::Partial => "partial",
        }
    }
}

/// New values for one item. Absent fields keep their current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(rename = "_id", alias = "id")]
    pub id: ItemId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        rename = "price",
        default,
        with = "common::money::decimal::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_price: Option<Money>,

    #[serde(rename = "quantity", default, skip_serializing_if = "Option::is_none")]
    pub available_quantity: Option<u32>,
}

impl ItemPatch {
    /// Creates a patch that only changes the stock level.
    pub fn stock(id: impl Into<ItemId>, available_quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: None,
            unit_price: None,
            available_quantity: Some(available_quantity),
        }
    }

    /// Returns true if the patch carries everything needed to create an item.
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.unit_price.is_some()
    }

    /// Overwrites the fields this patch provides.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name.clone_from(name);
        }
        if let Some(price) = self.unit_price {
            item.unit_price = price;
        }
        if let Some(quantity) = self.available_quantity {
            item.available_quantity = quantity;
        }
    }

    /// Builds a new item from this patch, if it is complete.
    pub fn into_item(self) -> Option<Item> {
        Some(Item {
            id: self.id,
            name: self.name?,
            unit_price: self.unit_price?,
            available_quantity: self.available_quantity.unwrap_or(0),
        })
    }
}

impl From<Item> for ItemPatch {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: Some(item.name),
            unit_price: Some(item.unit_price),
            available_quantity: Some(item.available_quantity),
        }
    }
}

/// A parsed update, ready to apply to a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryUpdate {
    pub kind: UpdateKind,
    pub patches: Vec<ItemPatch>,
}

impl InventoryUpdate {
    /// Creates a full replacement from complete items.
    pub fn full(items: Vec<Item>) -> Self {
        Self {
            kind: UpdateKind::Full,
            patches: items.into_iter().map(ItemPatch::from).collect(),
        }
    }

    /// Creates a partial update.
    pub fn partial(patches: Vec<ItemPatch>) -> Self {
        Self {
            kind: UpdateKind::Partial,
            patches,
        }
    }

    /// Parses a pushed frame. The payload must be a JSON array of items.
    pub fn parse(frame: &PushFrame) -> Result<Self> {
        let (kind, payload) = match frame {
            PushFrame::Snapshot(payload) => (UpdateKind::Full, payload),
            PushFrame::Patch(payload) => (UpdateKind::Partial, payload),
        };

        let patches: Vec<ItemPatch> = serde_json::from_value(payload.clone())
            .map_err(|e| FeedError::UpdateDropped(format!("malformed {} update: {e}", kind.as_str())))?;

        Ok(Self { kind, patches })
    }
}
