//! Action trait and outcome types shared by all command actions

use serde::{Deserialize, Serialize};
use shared::conference::Order;

use crate::error::ConferenceError;
use crate::reconciler::Reconciled;

/// Caller-facing feedback for one executed command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Notice {
    /// Quantity changed; item not complete yet
    QuantityUpdated {
        item_index: usize,
        conferred: u32,
        required: u32,
    },
    /// Quantity changed and the item reached its required quantity
    ItemCompleted { item_index: usize },
    /// Increment requested on a complete item (informational)
    AlreadyComplete { item_index: usize },
    /// Scan counted; `remaining` more scans needed
    ScanCounted { item_index: usize, remaining: u32 },
    /// Scan counted the last unit
    ScanCompleted { item_index: usize },
    /// Item note changed
    ObservationUpdated { item_index: usize },
    /// Conference explicitly finalized
    Finalized,
}

impl Notice {
    /// Whether an open scanner should close after this notice
    pub fn closes_scanner(&self) -> bool {
        matches!(
            self,
            Self::ScanCompleted { .. } | Self::AlreadyComplete { .. } | Self::Finalized
        )
    }

    /// Whether the caller should leave the conference screen
    pub fn closes_screen(&self) -> bool {
        matches!(self, Self::Finalized)
    }
}

/// What an action produced
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// New order state that must be persisted
    Changed { reconciled: Reconciled, notice: Notice },
    /// Nothing to persist
    Unchanged { notice: Notice },
}

impl ActionOutcome {
    pub fn notice(&self) -> Notice {
        match self {
            Self::Changed { notice, .. } | Self::Unchanged { notice } => *notice,
        }
    }
}

/// A command action applied to an order snapshot
///
/// Actions are pure: they read the snapshot and return a new value.
pub trait ConferenceAction {
    fn apply(&self, order: &Order) -> Result<ActionOutcome, ConferenceError>;
}
