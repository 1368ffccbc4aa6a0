//! Scan command handler
//!
//! Delegates to the scan adapter and turns its outcome into a notice.

use shared::conference::Order;

use crate::error::ConferenceError;
use crate::scan::{self, ScanMatch};
use crate::traits::{ActionOutcome, ConferenceAction, Notice};

/// Scan action
#[derive(Debug, Clone)]
pub struct ScanAction {
    pub item_index: usize,
    pub code: String,
}

impl ConferenceAction for ScanAction {
    fn apply(&self, order: &Order) -> Result<ActionOutcome, ConferenceError> {
        let item_index = self.item_index;
        let outcome = match scan::handle_scan(order, item_index, &self.code)? {
            ScanMatch::Counted {
                reconciled,
                remaining,
            } => ActionOutcome::Changed {
                reconciled,
                notice: Notice::ScanCounted {
                    item_index,
                    remaining,
                },
            },
            ScanMatch::Completed { reconciled } => ActionOutcome::Changed {
                reconciled,
                notice: Notice::ScanCompleted { item_index },
            },
            ScanMatch::AlreadyComplete => ActionOutcome::Unchanged {
                notice: Notice::AlreadyComplete { item_index },
            },
        };
        Ok(outcome)
    }
}
