//! The order submission request body.

use common::{ItemId, Money};
use domain::{Cart, CartLine};
use serde::{Deserialize, Serialize};

/// One requested item and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequestLine {
    #[serde(rename = "fruitId")]
    pub item_id: ItemId,
    pub quantity: u32,
}

/// What the order store receives when the shopper checks out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<OrderRequestLine>,

    #[serde(rename = "totalCost", with = "common::money::decimal")]
    pub total_cost: Money,
}

impl OrderRequest {
    /// Builds a request from cart lines, totalling their snapshot prices.
    pub fn from_lines(lines: &[CartLine]) -> Self {
        Self {
            items: lines
                .iter()
                .map(|line| OrderRequestLine {
                    item_id: line.item_id.clone(),
                    quantity: line.quantity,
                })
                .collect(),
            total_cost: lines.iter().map(CartLine::line_total).sum(),
        }
    }

    /// Builds a request from the whole cart.
    pub fn from_cart(cart: &Cart) -> Self {
        Self::from_lines(cart.lines())
    }

    /// Returns the number of units requested.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use common::Item;

    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let mut cart = Cart::new();
        let apple = Item::new("a1", "Apple", Money::from_cents(100), 5);
        cart.add(&apple);
        cart.add(&apple);
        cart.add(&Item::new("b1", "Banana", Money::from_cents(50), 5));

        let request = OrderRequest::from_cart(&cart);
        assert_eq!(request.total_quantity(), 3);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "items": [
                    {"fruitId": "a1", "quantity": 2},
                    {"fruitId": "b1", "quantity": 1}
                ],
                "totalCost": 2.5
            })
        );
    }
}
