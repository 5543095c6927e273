//! Single-slot transfer of the spent cart to the confirmation view.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use common::Money;
use domain::CartLine;
use serde::{Deserialize, Serialize};

/// Name of the handoff slot.
pub const HANDOFF_KEY: &str = "orderItems";

/// The cart lines as they were when the order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handoff {
    pub lines: Vec<CartLine>,
    pub total: Money,
    pub written_at: DateTime<Utc>,
}

impl Handoff {
    /// Creates a handoff from cart lines, totalling their snapshot prices.
    pub fn new(lines: Vec<CartLine>) -> Self {
        let total = lines.iter().map(CartLine::line_total).sum();
        Self {
            lines,
            total,
            written_at: Utc::now(),
        }
    }
}

/// Process-local, write-once/read-once store for one [`Handoff`].
///
/// Clones share the slot.
#[derive(Debug, Clone, Default)]
pub struct HandoffBuffer {
    slot: Arc<Mutex<Option<Handoff>>>,
}

impl HandoffBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Handoff>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores a handoff, replacing any that was never read.
    ///
    /// Returns true if an unread handoff was overwritten.
    pub fn put(&self, handoff: Handoff) -> bool {
        let previous = self.lock().replace(handoff);
        if let Some(previous) = &previous {
            tracing::warn!(
                key = HANDOFF_KEY,
                lines = previous.lines.len(),
                "unread handoff overwritten"
            );
        }
        previous.is_some()
    }

    /// Removes and returns the stored handoff.
    pub fn take(&self) -> Option<Handoff> {
        self.lock().take()
    }

    /// Returns true if a handoff is waiting to be read.
    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }
}
