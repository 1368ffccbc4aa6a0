//! Conference progress summary

use super::order::Order;
use serde::{Deserialize, Serialize};

/// Read-only summary of how far an order's conference has gone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceProgress {
    /// Number of line items
    pub total_items: usize,
    /// Items fully conferred
    pub conferred_items: usize,
    /// Items still pending
    pub pending_items: usize,
    /// Scans still needed across all items
    pub remaining_units: u64,
}

impl ConferenceProgress {
    pub fn of(order: &Order) -> Self {
        let conferred_items = order.items.iter().filter(|i| i.is_conferred()).count();
        Self {
            total_items: order.items.len(),
            conferred_items,
            pending_items: order.items.len() - conferred_items,
            remaining_units: order.items.iter().map(|i| u64::from(i.remaining())).sum(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.pending_items == 0
    }
}

impl Order {
    /// Progress summary for this order
    pub fn progress(&self) -> ConferenceProgress {
        ConferenceProgress::of(self)
    }
}
