//! Storefront entry point.
//!
//! Runs one scripted shopping session against the configured backend: load
//! inventory, fill a cart, check out, then show the confirmation and the
//! order history.

use storefront::{BRAND, Config, Route, StorefrontSession, backend_from_config};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    // 1. Load configuration
    let config = Config::from_env();

    // 2. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 3. Build the session
    let backend = backend_from_config(&config);
    let mut session = StorefrontSession::new(backend, &config);
    tracing::info!(
        brand = BRAND,
        demo = config.uses_demo_backend(),
        api_url = config.api_url.as_deref().unwrap_or("-"),
        "starting storefront"
    );
    session.start().await;

    // 4. Shop
    let items = session.available_items().await;
    for item in &items {
        tracing::info!(
            page = %Route::Shop,
            item = %item.name,
            price = %item.unit_price,
            stock = item.available_quantity,
            "listed"
        );
    }
    for item in items.iter().take(2) {
        if let Err(e) = session.add_to_cart(&item.id).await {
            tracing::warn!(item = %item.name, error = %e, "could not add to cart");
        }
    }
    if let Some(first) = items.first() {
        // A second unit of the first item.
        if let Err(e) = session.add_to_cart(&first.id).await {
            tracing::warn!(item = %first.name, error = %e, "could not add to cart");
        }
    }
    for line in session.cart_lines().await {
        tracing::info!(line = %line, "in cart");
    }
    tracing::info!(total = %session.cart_total().await, "cart total");

    // 5. Check out
    match session.place_order().await {
        Ok(submission) => tracing::info!(
            state = %submission.state(),
            order_id = submission.order_id().map(ToString::to_string).as_deref().unwrap_or("-"),
            "order placed"
        ),
        Err(e) => tracing::warn!(error = %e, "order not placed"),
    }
    if session.route() == Route::Success {
        match session.open_confirmation() {
            Ok(confirmation) => {
                for line in confirmation.render_lines() {
                    tracing::info!(page = %Route::Success, line = %line, "confirmed");
                }
                tracing::info!(total = %confirmation.total(), "confirmation total");
            }
            Err(e) => tracing::warn!(error = %e, "nothing to confirm"),
        }
        session.back_to_shop().await;
    }

    // 6. Order history
    for order in session.open_orders().await {
        let lines: Vec<String> = order.lines.iter().map(ToString::to_string).collect();
        tracing::info!(
            page = %Route::Orders,
            order_id = %order.order_id,
            total = %order.total_cost,
            lines = %lines.join(", "),
            "order"
        );
    }

    for notice in session.drain_notices() {
        tracing::warn!(kind = notice.kind(), "{notice}");
    }

    session.shutdown().await;
}
