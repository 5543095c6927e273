//! Read-only views over an inventory snapshot.

use std::collections::HashMap;

use crate::{Item, ItemId, ItemSnapshot};

/// Current stock levels, keyed by item.
pub trait StockLevels {
    /// Returns the available quantity for an item, or `None` if the item is
    /// not known at all.
    fn stock_of(&self, item_id: &ItemId) -> Option<u32>;
}

/// Resolves an item reference to its name and price.
pub trait ItemLookup {
    /// Returns the display projection for an item, if known.
    fn lookup(&self, item_id: &ItemId) -> Option<ItemSnapshot>;
}

impl StockLevels for HashMap<ItemId, u32> {
    fn stock_of(&self, item_id: &ItemId) -> Option<u32> {
        self.get(item_id).copied()
    }
}

impl StockLevels for [Item] {
    fn stock_of(&self, item_id: &ItemId) -> Option<u32> {
        self.iter()
            .find(|item| &item.id == item_id)
            .map(|item| item.available_quantity)
    }
}

impl ItemLookup for [Item] {
    fn lookup(&self, item_id: &ItemId) -> Option<ItemSnapshot> {
        self.iter()
            .find(|item| &item.id == item_id)
            .map(Item::snapshot)
    }
}
