//! Cart aggregate implementation.

use common::{Item, ItemId, Money, StockLevels};
use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregate;
use crate::error::CartError;

use super::{CartEvent, CartLine, ClampNotice, events::QuantityChangedData};

/// Cart aggregate root.
///
/// Holds the shopper's in-progress selection. Lines are kept in order of
/// first insertion, there is at most one line per item, and every line has
/// a quantity of at least 1.
///
/// The cart is plain data. Sessions that share it across tasks wrap it in a
/// single-writer lock so mutations never interleave.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Aggregate for Cart {
    type Event = CartEvent;

    fn aggregate_type() -> &'static str {
        "Cart"
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            CartEvent::LineAdded(data) => {
                self.lines.push(CartLine::new(
                    data.item_id,
                    data.name,
                    1,
                    data.snapshot_price,
                ));
            }
            CartEvent::QuantityChanged(data) => self.apply_quantity_changed(data),
            CartEvent::LineRemoved(data) => {
                self.lines.retain(|line| line.item_id != data.item_id);
            }
            CartEvent::Cleared => self.lines.clear(),
        }
    }
}

// Query methods
impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the line for an item, if present.
    pub fn line(&self, item_id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.item_id == item_id)
    }

    /// Returns true if the cart holds a line for the item.
    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.line(item_id).is_some()
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Returns the sum of snapshot price times quantity over all lines.
    ///
    /// Computed on every call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

// Command methods (decide, apply, and return the applied events)
impl Cart {
    /// Adds one unit of an item.
    ///
    /// Creates a line at the item's current price if none exists, otherwise
    /// increments the existing line. Stock is not checked here; see
    /// [`Cart::clamp_to_available`].
    pub fn add(&mut self, item: &Item) -> Vec<CartEvent> {
        let events = match self.line(&item.id) {
            Some(existing) => vec![CartEvent::quantity_changed(
                item.id.clone(),
                existing.quantity,
                existing.quantity.saturating_add(1),
            )],
            None => vec![CartEvent::line_added(
                item.id.clone(),
                item.name.clone(),
                item.unit_price,
            )],
        };
        self.apply_events(events.clone());
        events
    }

    /// Adds one unit of an item that is currently in stock.
    ///
    /// Used by callers that offer only listed items; an item with zero stock
    /// is rejected without touching the cart.
    pub fn add_in_stock(&mut self, item: &Item) -> Result<Vec<CartEvent>, CartError> {
        if !item.is_available() {
            return Err(CartError::OutOfStock(item.id.clone()));
        }
        Ok(self.add(item))
    }

    /// Removes one unit of an item.
    ///
    /// The line goes away when it reaches zero. Removing an item that is not
    /// in the cart does nothing.
    pub fn remove(&mut self, item_id: &ItemId) -> Vec<CartEvent> {
        let events = match self.line(item_id) {
            Some(existing) if existing.quantity > 1 => vec![CartEvent::quantity_changed(
                item_id.clone(),
                existing.quantity,
                existing.quantity - 1,
            )],
            Some(existing) => vec![CartEvent::line_removed(item_id.clone(), existing.quantity)],
            None => vec![],
        };
        self.apply_events(events.clone());
        events
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> Vec<CartEvent> {
        if self.is_empty() {
            return vec![];
        }
        self.apply(CartEvent::Cleared);
        vec![CartEvent::Cleared]
    }

    /// Reduces every line to at most the item's current available quantity.
    ///
    /// Lines for items that are out of stock, or unknown to `inventory`, are
    /// removed. Returns one notice per line that changed.
    pub fn clamp_to_available<S>(&mut self, inventory: &S) -> Vec<ClampNotice>
    where
        S: StockLevels + ?Sized,
    {
        let mut events = Vec::new();
        let mut notices = Vec::new();

        for line in &self.lines {
            let available = inventory.stock_of(&line.item_id).unwrap_or(0);
            if line.quantity <= available {
                continue;
            }

            if available == 0 {
                events.push(CartEvent::line_removed(line.item_id.clone(), line.quantity));
            } else {
                events.push(CartEvent::quantity_changed(
                    line.item_id.clone(),
                    line.quantity,
                    available,
                ));
            }

            tracing::warn!(
                aggregate = Self::aggregate_type(),
                item_id = %line.item_id,
                requested = line.quantity,
                available,
                "cart line clamped to available stock"
            );
            notices.push(ClampNotice {
                item_id: line.item_id.clone(),
                name: line.name.clone(),
                requested: line.quantity,
                clamped_to: available,
            });
        }

        if !notices.is_empty() {
            metrics::counter!("cart_lines_clamped_total").increment(notices.len() as u64);
        }

        self.apply_events(events);
        notices
    }
}

// Apply event helpers
impl Cart {
    fn apply_quantity_changed(&mut self, data: QuantityChangedData) {
        if data.new_quantity == 0 {
            self.lines.retain(|line| line.item_id != data.item_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == data.item_id) {
            line.quantity = data.new_quantity;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::aggregate::DomainEvent;

    fn apple() -> Item {
        Item::new("apple", "Apple", Money::from_cents(100), 10)
    }

    fn banana() -> Item {
        Item::new("banana", "Banana", Money::from_cents(50), 10)
    }

    fn stock(levels: &[(&str, u32)]) -> HashMap<ItemId, u32> {
        levels
            .iter()
            .map(|(id, qty)| (ItemId::new(*id), *qty))
            .collect()
    }

    #[test]
    fn test_aggregate_type() {
        assert_eq!(Cart::aggregate_type(), "Cart");
    }

    #[test]
    fn test_total_of_huge_prices_saturates() {
        let pricey = Item::new("gold", "Golden Apple", Money::from_cents(i64::MAX / 2 + 1), 10);
        let mut cart = Cart::new();
        cart.add(&pricey);
        cart.add(&pricey);
        cart.add(&apple());

        assert_eq!(cart.total().cents(), i64::MAX);
    }

    #[test]
    fn test_add_creates_line_with_quantity_one() {
        let mut cart = Cart::new();
        let events = cart.add(&apple());

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "LineAdded");
        let line = cart.line(&ItemId::new("apple")).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.snapshot_price.cents(), 100);
    }

    #[test]
    fn test_add_same_item_merges() {
        let mut cart = Cart::new();
        cart.add(&apple());
        let events = cart.add(&apple());

        assert_eq!(events[0].event_type(), "QuantityChanged");
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.line(&ItemId::new("apple")).unwrap().quantity, 2);
    }

    #[test]
    fn test_snapshot_price_survives_price_change() {
        let mut cart = Cart::new();
        cart.add(&apple());

        let mut repriced = apple();
        repriced.unit_price = Money::from_cents(250);
        cart.add(&repriced);

        assert_eq!(cart.total().cents(), 200);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&banana());
        cart.add(&apple());
        cart.add(&banana());

        let names: Vec<_> = cart.lines().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Banana", "Apple"]);
    }

    #[test]
    fn test_add_in_stock_rejects_sold_out_item() {
        let mut cart = Cart::new();
        let mut sold_out = apple();
        sold_out.available_quantity = 0;

        let result = cart.add_in_stock(&sold_out);
        assert_eq!(result, Err(CartError::OutOfStock(ItemId::new("apple"))));
        assert!(cart.is_empty());

        assert_eq!(cart.add_in_stock(&apple()).unwrap().len(), 1);
    }

    #[test]
    fn test_remove_decrements_then_drops_line() {
        let mut cart = Cart::new();
        cart.add(&apple());
        cart.add(&apple());

        let events = cart.remove(&ItemId::new("apple"));
        assert_eq!(events[0].event_type(), "QuantityChanged");
        assert_eq!(cart.line(&ItemId::new("apple")).unwrap().quantity, 1);

        let events = cart.remove(&ItemId::new("apple"));
        assert_eq!(events[0].event_type(), "LineRemoved");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut cart = Cart::new();
        cart.add(&apple());

        let events = cart.remove(&ItemId::new("cherry"));
        assert!(events.is_empty());
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&apple());
        cart.add(&banana());

        assert_eq!(cart.clear(), vec![CartEvent::Cleared]);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());

        assert!(cart.clear().is_empty());
    }

    #[test]
    fn test_total_and_quantity() {
        let mut cart = Cart::new();
        cart.add(&apple());
        cart.add(&apple());
        cart.add(&banana());

        assert_eq!(cart.total().cents(), 250);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_clamp_reduces_line_to_available() {
        let mut cart = Cart::new();
        cart.add(&apple());
        cart.add(&apple());
        cart.add(&banana());

        let notices = cart.clamp_to_available(&stock(&[("apple", 1), ("banana", 5)]));

        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].item_id, ItemId::new("apple"));
        assert_eq!(notices[0].requested, 2);
        assert_eq!(notices[0].clamped_to, 1);
        assert_eq!(cart.line(&ItemId::new("apple")).unwrap().quantity, 1);
        assert_eq!(cart.line(&ItemId::new("banana")).unwrap().quantity, 1);
        assert_eq!(cart.total().cents(), 150);
    }

    #[test]
    fn test_clamp_removes_sold_out_and_unknown_items() {
        let mut cart = Cart::new();
        cart.add(&apple());
        cart.add(&banana());

        let notices = cart.clamp_to_available(&stock(&[("apple", 0)]));

        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(ClampNotice::is_removal));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clamp_without_shortage_changes_nothing() {
        let mut cart = Cart::new();
        cart.add(&apple());

        let notices = cart.clamp_to_available(&stock(&[("apple", 1)]));
        assert!(notices.is_empty());
        assert_eq!(cart.line(&ItemId::new("apple")).unwrap().quantity, 1);
    }

    #[test]
    fn test_clamp_accepts_item_slice() {
        let mut cart = Cart::new();
        cart.add(&apple());
        cart.add(&apple());

        let mut low = apple();
        low.available_quantity = 1;
        let inventory = vec![low];

        cart.clamp_to_available(inventory.as_slice());
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_serialization() {
        let mut cart = Cart::new();
        cart.add(&apple());

        let json = serde_json::to_string(&cart).unwrap();
        let deserialized: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.lines(), cart.lines());
    }
}
