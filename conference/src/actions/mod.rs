//! Command action implementations
//!
//! Each action implements the `ConferenceAction` trait and handles
//! one specific command type.

use shared::conference::Order;

use crate::command::ConferenceCommand;
use crate::error::ConferenceError;
use crate::reconciler::Reconciled;
use crate::traits::{ActionOutcome, ConferenceAction, Notice};

mod decrement;
mod finalize;
mod increment;
mod scan;
mod set_observation;
mod set_quantity;

pub use decrement::DecrementAction;
pub use finalize::FinalizeAction;
pub use increment::IncrementAction;
pub use scan::ScanAction;
pub use set_observation::SetObservationAction;
pub use set_quantity::SetQuantityAction;

/// CommandAction enum - dispatches to concrete action implementations
#[derive(Debug, Clone)]
pub enum CommandAction {
    SetQuantity(SetQuantityAction),
    Increment(IncrementAction),
    Decrement(DecrementAction),
    Scan(ScanAction),
    SetObservation(SetObservationAction),
    Finalize(FinalizeAction),
}

impl ConferenceAction for CommandAction {
    fn apply(&self, order: &Order) -> Result<ActionOutcome, ConferenceError> {
        match self {
            CommandAction::SetQuantity(action) => action.apply(order),
            CommandAction::Increment(action) => action.apply(order),
            CommandAction::Decrement(action) => action.apply(order),
            CommandAction::Scan(action) => action.apply(order),
            CommandAction::SetObservation(action) => action.apply(order),
            CommandAction::Finalize(action) => action.apply(order),
        }
    }
}

/// Convert ConferenceCommand to CommandAction
///
/// This is the ONLY place with a match on ConferenceCommand variants.
impl From<&ConferenceCommand> for CommandAction {
    fn from(cmd: &ConferenceCommand) -> Self {
        match cmd {
            ConferenceCommand::SetQuantity {
                item_index,
                quantity,
            } => CommandAction::SetQuantity(SetQuantityAction {
                item_index: *item_index,
                quantity: *quantity,
            }),
            ConferenceCommand::Increment { item_index } => CommandAction::Increment(IncrementAction {
                item_index: *item_index,
            }),
            ConferenceCommand::Decrement { item_index } => CommandAction::Decrement(DecrementAction {
                item_index: *item_index,
            }),
            ConferenceCommand::Scan { item_index, code } => CommandAction::Scan(ScanAction {
                item_index: *item_index,
                code: code.clone(),
            }),
            ConferenceCommand::SetObservation {
                item_index,
                observation,
            } => CommandAction::SetObservation(SetObservationAction {
                item_index: *item_index,
                observation: observation.clone(),
            }),
            ConferenceCommand::Finalize => CommandAction::Finalize(FinalizeAction),
        }
    }
}

/// Notice for a plain quantity change on `item_index`
pub(crate) fn quantity_notice(reconciled: &Reconciled, item_index: usize) -> Notice {
    let item = &reconciled.order.items[item_index];
    if item.is_conferred() {
        Notice::ItemCompleted { item_index }
    } else {
        Notice::QuantityUpdated {
            item_index,
            conferred: item.conferred_quantity,
            required: item.required_quantity,
        }
    }
}
