//! SetQuantity command handler
//!
//! Direct edit of an item's conferred quantity.

use shared::conference::Order;

use super::quantity_notice;
use crate::error::ConferenceError;
use crate::reconciler;
use crate::traits::{ActionOutcome, ConferenceAction};

/// SetQuantity action
#[derive(Debug, Clone)]
pub struct SetQuantityAction {
    pub item_index: usize,
    pub quantity: i64,
}

impl ConferenceAction for SetQuantityAction {
    fn apply(&self, order: &Order) -> Result<ActionOutcome, ConferenceError> {
        let reconciled = reconciler::set_item_quantity(order, self.item_index, self.quantity)?;
        let notice = quantity_notice(&reconciled, self.item_index);
        Ok(ActionOutcome::Changed { reconciled, notice })
    }
}
