//! Increment command handler

use shared::conference::Order;

use super::quantity_notice;
use crate::error::ConferenceError;
use crate::reconciler::{self, Increment};
use crate::traits::{ActionOutcome, ConferenceAction, Notice};

/// Increment action
#[derive(Debug, Clone)]
pub struct IncrementAction {
    pub item_index: usize,
}

impl ConferenceAction for IncrementAction {
    fn apply(&self, order: &Order) -> Result<ActionOutcome, ConferenceError> {
        match reconciler::increment_item_quantity(order, self.item_index)? {
            Increment::AlreadyComplete => Ok(ActionOutcome::Unchanged {
                notice: Notice::AlreadyComplete {
                    item_index: self.item_index,
                },
            }),
            Increment::Applied(reconciled) => {
                let notice = quantity_notice(&reconciled, self.item_index);
                Ok(ActionOutcome::Changed { reconciled, notice })
            }
        }
    }
}
