//! Conference commands
//!
//! One command per operator action on the conference screen.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConferenceCommand {
    /// Direct edit of an item's conferred quantity
    SetQuantity { item_index: usize, quantity: i64 },
    /// "+" button
    Increment { item_index: usize },
    /// "-" button
    Decrement { item_index: usize },
    /// A scanned code for the selected item
    Scan { item_index: usize, code: String },
    /// Set or clear an item's note
    SetObservation {
        item_index: usize,
        #[serde(default)]
        observation: Option<String>,
    },
    /// "Finalizar" button
    Finalize,
}

impl ConferenceCommand {
    /// Item the command targets, if any
    pub fn item_index(&self) -> Option<usize> {
        match self {
            Self::SetQuantity { item_index, .. }
            | Self::Increment { item_index }
            | Self::Decrement { item_index }
            | Self::Scan { item_index, .. }
            | Self::SetObservation { item_index, .. } => Some(*item_index),
            Self::Finalize => None,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetQuantity { .. } => "set_quantity",
            Self::Increment { .. } => "increment",
            Self::Decrement { .. } => "decrement",
            Self::Scan { .. } => "scan",
            Self::SetObservation { .. } => "set_observation",
            Self::Finalize => "finalize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_serde() {
        let cmd = ConferenceCommand::SetQuantity {
            item_index: 2,
            quantity: 5,
        };
        let value = serde_json::to_value(&cmd).unwrap();
        assert_eq!(value, json!({ "type": "SET_QUANTITY", "item_index": 2, "quantity": 5 }));

        let parsed: ConferenceCommand =
            serde_json::from_value(json!({ "type": "SET_OBSERVATION", "item_index": 0 })).unwrap();
        assert_eq!(
            parsed,
            ConferenceCommand::SetObservation {
                item_index: 0,
                observation: None
            }
        );

        let parsed: ConferenceCommand = serde_json::from_value(json!({ "type": "FINALIZE" })).unwrap();
        assert_eq!(parsed, ConferenceCommand::Finalize);
    }

    #[test]
    fn test_item_index() {
        assert_eq!(ConferenceCommand::Increment { item_index: 3 }.item_index(), Some(3));
        assert_eq!(ConferenceCommand::Finalize.item_index(), None);
    }
}
