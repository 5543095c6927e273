//! Non-fatal notices for the presentation layer.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use domain::ClampNotice;

/// Something the shopper should be told about. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The initial inventory load failed; the shop shows no items.
    FeedUnavailable(String),
    /// A pushed inventory update was skipped; the previous stock is shown.
    FeedUpdateDropped(String),
    /// A cart line was reduced or removed to match the stock.
    StaleQuantityClamped(ClampNotice),
    /// The order store did not confirm the order.
    OrderSubmissionFailed(String),
}

impl Notice {
    /// Returns the notice kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            Notice::FeedUnavailable(_) => "FeedUnavailable",
            Notice::FeedUpdateDropped(_) => "FeedUpdateDropped",
            Notice::StaleQuantityClamped(_) => "StaleQuantityClamped",
            Notice::OrderSubmissionFailed(_) => "OrderSubmissionFailed",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::FeedUnavailable(_) => f.write_str("Inventory is unavailable right now"),
            Notice::FeedUpdateDropped(_) => f.write_str("Stock levels may be out of date"),
            Notice::StaleQuantityClamped(clamp) => write!(f, "{clamp}"),
            Notice::OrderSubmissionFailed(_) => f.write_str(
                "We could not confirm your order; check the orders page to see if it went through",
            ),
        }
    }
}

/// Shared queue of pending notices. Clones share the queue.
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    inner: Arc<Mutex<Vec<Notice>>>,
}

impl NoticeQueue {
    fn lock(&self) -> MutexGuard<'_, Vec<Notice>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, notice: Notice) {
        tracing::debug!(kind = notice.kind(), "notice raised");
        metrics::counter!("storefront_notices_total", "kind" => notice.kind()).increment(1);
        self.lock().push(notice);
    }

    /// Removes and returns every pending notice, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use common::ItemId;

    use super::*;

    #[test]
    fn test_drain_empties_queue() {
        let queue = NoticeQueue::default();
        queue.push(Notice::FeedUnavailable("down".to_string()));
        queue.clone().push(Notice::FeedUpdateDropped("bad frame".to_string()));

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].kind(), "FeedUnavailable");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clamp_notice_display() {
        let notice = Notice::StaleQuantityClamped(ClampNotice {
            item_id: ItemId::new("a"),
            name: "Apple".to_string(),
            requested: 2,
            clamped_to: 1,
        });
        assert_eq!(notice.to_string(), "Only 1 Apple left; your cart was reduced from 2");
    }
}
