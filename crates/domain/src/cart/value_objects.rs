//! Value objects for the cart domain.

use common::{ItemId, Money};
use serde::{Deserialize, Serialize};

/// A line in the cart.
///
/// A line exists only while its quantity is at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The item this line is for.
    pub item_id: ItemId,

    /// Item name at add-time, kept so the line renders even if the item
    /// later drops out of the available view.
    pub name: String,

    /// Quantity requested.
    pub quantity: u32,

    /// Unit price captured when the line was created.
    pub snapshot_price: Money,
}

impl CartLine {
    /// Creates a new cart line.
    pub fn new(
        item_id: impl Into<ItemId>,
        name: impl Into<String>,
        quantity: u32,
        snapshot_price: Money,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            quantity,
            snapshot_price,
        }
    }

    /// Returns the total price for this line (quantity * snapshot_price).
    pub fn line_total(&self) -> Money {
        self.snapshot_price.multiply(self.quantity)
    }
}

impl std::fmt::Display for CartLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} x {}", self.name, self.snapshot_price, self.quantity)
    }
}

/// Raised when reconciliation reduced or removed a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampNotice {
    pub item_id: ItemId,
    pub name: String,
    /// Quantity the line held before reconciliation.
    pub requested: u32,
    /// Quantity after reconciliation; 0 means the line was removed.
    pub clamped_to: u32,
}

impl ClampNotice {
    /// Returns true if the line was removed entirely.
    pub fn is_removal(&self) -> bool {
        self.clamped_to == 0
    }
}

impl std::fmt::Display for ClampNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_removal() {
            write!(f, "{} is out of stock and was removed from your cart", self.name)
        } else {
            write!(
                f,
                "Only {} {} left; your cart was reduced from {}",
                self.clamped_to, self.name, self.requested
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let line = CartLine::new("a", "Apple", 3, Money::from_cents(100));
        assert_eq!(line.line_total().cents(), 300);
    }

    #[test]
    fn test_line_display() {
        let line = CartLine::new("b", "Banana", 2, Money::from_cents(50));
        assert_eq!(line.to_string(), "Banana - $0.50 x 2");
    }

    #[test]
    fn test_clamp_notice_display() {
        let reduced = ClampNotice {
            item_id: ItemId::new("a"),
            name: "Apple".to_string(),
            requested: 2,
            clamped_to: 1,
        };
        assert!(!reduced.is_removal());
        assert_eq!(
            reduced.to_string(),
            "Only 1 Apple left; your cart was reduced from 2"
        );

        let removed = ClampNotice {
            clamped_to: 0,
            ..reduced
        };
        assert!(removed.is_removal());
        assert!(removed.to_string().contains("removed"));
    }
}
