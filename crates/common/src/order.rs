//! Placed orders as the external order store returns them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ItemId, ItemSnapshot, Money, OrderId};

/// Reference from an order line to the item it was placed for.
///
/// The store populates the reference when it can; an item that has since
/// been deleted comes back as a bare id or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemRef {
    /// The store resolved the item.
    Resolved(ItemSnapshot),
    /// Only the id is known.
    Id(ItemId),
}

impl ItemRef {
    /// Returns the referenced item id.
    pub fn item_id(&self) -> &ItemId {
        match self {
            ItemRef::Resolved(snapshot) => &snapshot.id,
            ItemRef::Id(id) => id,
        }
    }
}

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecordLine {
    #[serde(rename = "fruitId", default)]
    pub item: Option<ItemRef>,
    pub quantity: u32,
}

impl OrderRecordLine {
    /// Returns the referenced item id, if the store kept one.
    pub fn item_id(&self) -> Option<&ItemId> {
        self.item.as_ref().map(ItemRef::item_id)
    }

    /// Returns the embedded item snapshot, if the store resolved it.
    pub fn resolved(&self) -> Option<&ItemSnapshot> {
        match &self.item {
            Some(ItemRef::Resolved(snapshot)) => Some(snapshot),
            _ => None,
        }
    }
}

/// An order owned by the external store. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: OrderId,

    #[serde(rename = "items")]
    pub lines: Vec<OrderRecordLine>,

    #[serde(rename = "totalCost", with = "crate::money::decimal")]
    pub total_cost: Money,

    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populated_and_missing_references() {
        let json = r#"{
            "_id": "o1",
            "items": [
                {"fruitId": {"_id": "a1", "name": "Apple", "price": 1.0, "quantity": 3}, "quantity": 2},
                {"fruitId": null, "quantity": 1},
                {"fruitId": "b1", "quantity": 4}
            ],
            "totalCost": 2.5
        }"#;

        let order: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(order.id.as_str(), "o1");
        assert_eq!(order.total_cost.cents(), 250);
        assert_eq!(order.lines.len(), 3);

        assert_eq!(order.lines[0].resolved().unwrap().name, "Apple");
        assert!(order.lines[1].item.is_none());
        assert_eq!(order.lines[2].item_id(), Some(&ItemId::new("b1")));
        assert!(order.lines[2].resolved().is_none());
    }

    #[test]
    fn test_missing_reference_field_defaults_to_none() {
        let json = r#"{"_id": "o2", "items": [{"quantity": 1}], "totalCost": 0}"#;
        let order: OrderRecord = serde_json::from_str(json).unwrap();
        assert!(order.lines[0].item.is_none());
        assert!(order.created_at.is_none());
    }
}
