//! Decrement command handler

use shared::conference::Order;

use super::quantity_notice;
use crate::error::ConferenceError;
use crate::reconciler;
use crate::traits::{ActionOutcome, ConferenceAction};

/// Decrement action
#[derive(Debug, Clone)]
pub struct DecrementAction {
    pub item_index: usize,
}

impl ConferenceAction for DecrementAction {
    fn apply(&self, order: &Order) -> Result<ActionOutcome, ConferenceError> {
        let reconciled = reconciler::decrement_item_quantity(order, self.item_index)?;
        let notice = quantity_notice(&reconciled, self.item_index);
        Ok(ActionOutcome::Changed { reconciled, notice })
    }
}
