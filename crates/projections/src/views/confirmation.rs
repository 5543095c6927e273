//! Confirmation read model: the order just placed.

use checkout::{Handoff, HandoffBuffer};
use chrono::{DateTime, Utc};
use common::Money;
use serde::Serialize;

use crate::read_model::ReadModel;
use crate::{ProjectionError, Result};

/// One line on the confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl ConfirmationLine {
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

impl std::fmt::Display for ConfirmationLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} × {}", self.name, self.quantity)
    }
}

/// What the shopper sees after checkout, whether or not the order store
/// accepted the order. Order history is the record of what was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationView {
    lines: Vec<ConfirmationLine>,
    total: Money,
    placed_at: DateTime<Utc>,
}

impl ConfirmationView {
    /// Builds the view from a handoff.
    pub fn from_handoff(handoff: Handoff) -> Self {
        Self {
            lines: handoff
                .lines
                .into_iter()
                .map(|line| ConfirmationLine {
                    name: line.name,
                    quantity: line.quantity,
                    unit_price: line.snapshot_price,
                })
                .collect(),
            total: handoff.total,
            placed_at: handoff.written_at,
        }
    }

    /// Takes the pending handoff from the buffer and builds the view.
    ///
    /// The buffer is empty afterwards.
    pub fn take_from(buffer: &HandoffBuffer) -> Result<Self> {
        buffer
            .take()
            .map(Self::from_handoff)
            .ok_or(ProjectionError::NoHandoff)
    }

    pub fn lines(&self) -> &[ConfirmationLine] {
        &self.lines
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    /// Returns each line as `name × quantity`.
    pub fn render_lines(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }
}

impl ReadModel for ConfirmationView {
    fn name(&self) -> &'static str {
        "ConfirmationView"
    }

    fn count(&self) -> usize {
        self.lines.len()
    }
}
