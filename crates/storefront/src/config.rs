//! Application configuration loaded from environment variables.

use std::time::Duration;

use checkout::DEFAULT_SUBMIT_TIMEOUT;

/// Default interval between inventory polls against an HTTP backend.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Session configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `STOREFRONT_API_URL`: backend base URL (unset: in-memory demo backend)
/// - `STOREFRONT_SUBMIT_TIMEOUT_MS`: order submission timeout (default: `10000`)
/// - `STOREFRONT_POLL_INTERVAL_MS`: inventory poll interval (default: `2000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: Option<String>,
    pub submit_timeout: Duration,
    pub poll_interval: Duration,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from any key lookup, falling back to defaults.
    ///
    /// Unparseable numbers fall back to their defaults too.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let millis = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
        };

        Self {
            api_url: lookup("STOREFRONT_API_URL").filter(|url| !url.trim().is_empty()),
            submit_timeout: millis("STOREFRONT_SUBMIT_TIMEOUT_MS").unwrap_or(DEFAULT_SUBMIT_TIMEOUT),
            poll_interval: millis("STOREFRONT_POLL_INTERVAL_MS").unwrap_or(DEFAULT_POLL_INTERVAL),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Returns true when no backend URL is configured.
    pub fn uses_demo_backend(&self) -> bool {
        self.api_url.is_none()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            log_level: "info".to_string(),
        }
    }
}
