//! Domain error types.

use common::ItemId;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The item has no stock, so it is not offered for sale.
    #[error("Item {0} is out of stock")]
    OutOfStock(ItemId),

    /// The item is not in the current inventory at all.
    #[error("Item not found: {0}")]
    UnknownItem(ItemId),
}
