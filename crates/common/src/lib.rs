//! Shared data model for the storefront client.
//!
//! Everything here mirrors what the inventory and order endpoints hand out:
//! identifiers, money, items, and placed-order records. The lookup traits
//! let the cart and the history view read an inventory snapshot without
//! depending on the feed crate that owns it.

pub mod ids;
pub mod item;
pub mod lookup;
pub mod money;
pub mod order;

pub use ids::{ItemId, OrderId};
pub use item::{Item, ItemSnapshot};
pub use lookup::{ItemLookup, StockLevels};
pub use money::Money;
pub use order::{ItemRef, OrderRecord, OrderRecordLine};
