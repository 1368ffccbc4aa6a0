//! SetObservation command handler

use shared::conference::Order;

use crate::error::ConferenceError;
use crate::reconciler;
use crate::traits::{ActionOutcome, ConferenceAction, Notice};

/// SetObservation action
#[derive(Debug, Clone)]
pub struct SetObservationAction {
    pub item_index: usize,
    pub observation: Option<String>,
}

impl ConferenceAction for SetObservationAction {
    fn apply(&self, order: &Order) -> Result<ActionOutcome, ConferenceError> {
        let reconciled =
            reconciler::set_item_observation(order, self.item_index, self.observation.clone())?;
        Ok(ActionOutcome::Changed {
            reconciled,
            notice: Notice::ObservationUpdated {
                item_index: self.item_index,
            },
        })
    }
}
