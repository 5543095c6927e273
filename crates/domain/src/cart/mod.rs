//! Cart aggregate and related types.

mod aggregate;
mod events;
mod value_objects;

pub use aggregate::Cart;
pub use events::{CartEvent, LineAddedData, LineRemovedData, QuantityChangedData};
pub use value_objects::{CartLine, ClampNotice};
