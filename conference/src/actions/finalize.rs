//! Finalize command handler
//!
//! Explicit finalize requested by the operator. Quantity changes already
//! promote a fully conferred order to `Finalized` on their own; this action
//! checks the same precondition independently and writes the status again.

use shared::conference::Order;

use crate::error::ConferenceError;
use crate::reconciler;
use crate::traits::{ActionOutcome, ConferenceAction, Notice};

/// Finalize action
#[derive(Debug, Clone)]
pub struct FinalizeAction;

impl ConferenceAction for FinalizeAction {
    fn apply(&self, order: &Order) -> Result<ActionOutcome, ConferenceError> {
        let reconciled = reconciler::finalize_order(order)?;
        Ok(ActionOutcome::Changed {
            reconciled,
            notice: Notice::Finalized,
        })
    }
}
