//! The client's current view of inventory.

use std::collections::{HashMap, HashSet};

use common::{Item, ItemId, ItemLookup, ItemSnapshot, StockLevels};

use crate::update::{InventoryUpdate, UpdateKind};
use crate::{FeedError, Result};

/// What an applied update changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedUpdate {
    pub kind: UpdateKind,
    /// Items created or overwritten.
    pub upserted: usize,
    /// Known items a full update left out, now treated as out of stock.
    pub retired: usize,
}

/// Last known state of every item the client has seen.
///
/// Items that sell out, or that a full update omits, stay in the snapshot
/// with zero stock so anything already in a cart can still be named and
/// priced. Only [`InventorySnapshot::available`] hides them.
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    order: Vec<ItemId>,
    items: HashMap<ItemId, Item>,
}

impl InventorySnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a snapshot holding exactly these items, in this order.
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut snapshot = Self::new();
        // Complete items always apply.
        let _ = snapshot.apply(InventoryUpdate::full(items));
        snapshot
    }

    /// Returns the items in stock, in server order.
    pub fn available(&self) -> Vec<Item> {
        self.iter().filter(|item| item.is_available()).cloned().collect()
    }

    /// Returns every known item, including sold-out ones, in server order.
    pub fn all(&self) -> Vec<Item> {
        self.iter().cloned().collect()
    }

    /// Returns an item by ID.
    pub fn get(&self, item_id: &ItemId) -> Option<&Item> {
        self.items.get(item_id)
    }

    /// Returns the number of known items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no item is known.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = &Item> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Applies an update atomically.
    ///
    /// Patches overwrite only the fields they carry. A patch for an item the
    /// snapshot has never seen must carry a name and a price; otherwise the
    /// whole update is rejected and the snapshot is left as it was. An item
    /// introduced earlier in the same update counts as seen.
    pub fn apply(&mut self, update: InventoryUpdate) -> Result<AppliedUpdate> {
        let mut introduced: HashSet<&ItemId> = HashSet::new();
        for patch in &update.patches {
            if self.items.contains_key(&patch.id) || introduced.contains(&patch.id) {
                continue;
            }
            if !patch.is_complete() {
                return Err(FeedError::UpdateDropped(format!(
                    "unknown item {} without name and price",
                    patch.id
                )));
            }
            introduced.insert(&patch.id);
        }

        let mut retired = 0;
        if update.kind == UpdateKind::Full {
            let present: HashSet<&ItemId> = update.patches.iter().map(|p| &p.id).collect();
            for (id, item) in self.items.iter_mut() {
                if !present.contains(id) && item.available_quantity > 0 {
                    item.available_quantity = 0;
                    retired += 1;
                }
            }

            // Full updates also define display order; omitted items go last.
            let mut order: Vec<ItemId> = Vec::with_capacity(self.order.len());
            let mut seen = HashSet::new();
            for patch in &update.patches {
                if seen.insert(patch.id.clone()) {
                    order.push(patch.id.clone());
                }
            }
            order.extend(self.order.drain(..).filter(|id| !seen.contains(id)));
            self.order = order;
        }

        let upserted = update.patches.len();
        for patch in update.patches {
            match self.items.get_mut(&patch.id) {
                Some(item) => patch.apply_to(item),
                None => {
                    let id = patch.id.clone();
                    if let Some(item) = patch.into_item() {
                        if !self.order.contains(&id) {
                            self.order.push(id.clone());
                        }
                        self.items.insert(id, item);
                    }
                }
            }
        }

        Ok(AppliedUpdate {
            kind: update.kind,
            upserted,
            retired,
        })
    }
}

impl StockLevels for InventorySnapshot {
    fn stock_of(&self, item_id: &ItemId) -> Option<u32> {
        self.items.get(item_id).map(|item| item.available_quantity)
    }
}

impl ItemLookup for InventorySnapshot {
    fn lookup(&self, item_id: &ItemId) -> Option<ItemSnapshot> {
        self.items.get(item_id).map(Item::snapshot)
    }
}
