//! Storefront session shell.
//!
//! Wires the inventory feed, cart, checkout pipeline and read views into a
//! [`StorefrontSession`] with three pages ([`Route`]). Two backends are
//! available: in-memory doubles for demos and tests, and
//! [`HttpStorefrontClient`] for a REST server.

pub mod config;
pub mod error;
pub mod http;
pub mod notice;
pub mod session;
pub mod shell;

pub use config::{Config, DEFAULT_POLL_INTERVAL};
pub use error::{Result, SessionError};
pub use http::{HttpError, HttpStorefrontClient};
pub use notice::{Notice, NoticeQueue};
pub use session::{Backend, StorefrontSession};
pub use shell::{BRAND, Route};

use checkout::InMemoryOrderStore;
use common::{Item, Money};
use inventory_feed::InMemoryInventory;

/// Builds the backend a configuration asks for.
///
/// Without an API URL, the demo backend is seeded with [`demo_catalog`].
pub fn backend_from_config(config: &Config) -> Backend {
    match &config.api_url {
        Some(url) => Backend::http(
            HttpStorefrontClient::new(url.as_str()).with_poll_interval(config.poll_interval),
        ),
        None => {
            let catalog = demo_catalog();
            let orders = InMemoryOrderStore::with_catalog(catalog.iter().map(Item::snapshot));
            Backend::in_memory(InMemoryInventory::with_items(catalog), orders)
        }
    }
}

/// A small fruit catalog for the demo backend.
pub fn demo_catalog() -> Vec<Item> {
    vec![
        Item::new("apple", "Apple", Money::from_cents(120), 10),
        Item::new("banana", "Banana", Money::from_cents(45), 25),
        Item::new("cherry", "Cherry", Money::from_cents(399), 4),
        Item::new("mango", "Mango", Money::from_cents(250), 0),
    ]
}
