//! Navigation between the storefront pages.

use std::fmt;

/// Title shown in the navigation bar.
pub const BRAND: &str = "Fresh Fruit Shop";

/// A page of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// Inventory and cart.
    #[default]
    Shop,
    /// Placed orders.
    Orders,
    /// Confirmation after checkout.
    Success,
}

impl Route {
    /// Pages reachable from the navigation bar, in display order.
    pub const NAV_LINKS: [Route; 2] = [Route::Shop, Route::Orders];

    /// Returns the path the page is served under.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Shop => "/shop",
            Route::Orders => "/admin/orders",
            Route::Success => "/success",
        }
    }

    /// Returns the link label.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Shop => "Shop",
            Route::Orders => "Orders",
            Route::Success => "Success",
        }
    }

    /// Returns true if the navigation bar is shown on this page.
    pub fn shows_nav(&self) -> bool {
        !matches!(self, Route::Success)
    }

    /// Resolves a path to a page. Unknown paths resolve to nothing.
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" | "/shop" => Some(Route::Shop),
            "/admin/orders" => Some(Route::Orders),
            "/success" => Some(Route::Success),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
