//! Order snapshot as served by the conference API
//!
//! Field names follow the remote API (`Itens`, `Quantidade`,
//! `QuantidadeConferida`, ...). Fields the client does not interpret are kept
//! in `extra` so that a whole-object replace writes them back unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Server-managed order fields that must not be sent back on replace
const SERVER_MANAGED_FIELDS: [&str; 4] = ["_id", "__v", "createdAt", "updatedAt"];

/// Product reference carried by a line item
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Part number shown to operators
    #[serde(rename = "Partnumber", default, deserialize_with = "null_as_default")]
    pub part_number: String,
    /// Product description
    #[serde(rename = "Descricao", default, deserialize_with = "null_as_default")]
    pub description: String,
    /// EAN-13 barcode expected when scanning this product
    #[serde(rename = "Ean13", default, deserialize_with = "null_as_default")]
    pub ean13: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One product row within an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Item ID (assigned by server, never written back)
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "Produto", default, deserialize_with = "null_as_default")]
    pub product: Product,
    /// Quantity the order requires; immutable from the client's side
    #[serde(rename = "Quantidade", default, deserialize_with = "null_as_default")]
    pub required_quantity: u32,
    /// Quantity verified so far
    #[serde(rename = "QuantidadeConferida", default, deserialize_with = "null_as_default")]
    pub conferred_quantity: u32,
    /// Free-text note, unrelated to reconciliation
    #[serde(rename = "Observacao", default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LineItem {
    /// Create an item with the given required quantity and scan code
    pub fn new(part_number: impl Into<String>, ean13: impl Into<String>, required_quantity: u32) -> Self {
        Self {
            id: None,
            product: Product {
                part_number: part_number.into(),
                ean13: ean13.into(),
                ..Default::default()
            },
            required_quantity,
            conferred_quantity: 0,
            observation: None,
            extra: Map::new(),
        }
    }

    /// Set the conferred quantity (builder style)
    pub fn with_conferred(mut self, conferred_quantity: u32) -> Self {
        self.conferred_quantity = conferred_quantity;
        self
    }

    /// Whether the item is fully conferred
    pub fn is_conferred(&self) -> bool {
        self.conferred_quantity >= self.required_quantity
    }

    /// Scans still needed to reach the required quantity
    pub fn remaining(&self) -> u32 {
        self.required_quantity.saturating_sub(self.conferred_quantity)
    }

    /// Code a scan must match to count for this item
    pub fn expected_scan_code(&self) -> &str {
        &self.product.ean13
    }

    /// Label for notices and logs
    pub fn label(&self) -> &str {
        if self.product.part_number.is_empty() {
            &self.product.ean13
        } else {
            &self.product.part_number
        }
    }
}

/// Order snapshot - mirrored locally from the remote API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Order ID (assigned by server)
    #[serde(rename = "_id")]
    pub id: String,
    /// External status identifier; `None` when the order was never touched
    #[serde(default, deserialize_with = "deserialize_status_id")]
    pub status: Option<String>,
    /// Line items, in order of receipt
    #[serde(rename = "Itens", default)]
    pub items: Vec<LineItem>,
    /// Version token, bumped by the server on every write
    #[serde(rename = "__v", default)]
    pub version: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    /// Create an order with no status
    pub fn new(id: impl Into<String>, items: Vec<LineItem>) -> Self {
        Self {
            id: id.into(),
            status: None,
            items,
            version: 0,
            extra: Map::new(),
        }
    }

    /// Order number as displayed to operators (`Numero`), if present
    pub fn number(&self) -> Option<&str> {
        self.extra.get("Numero").and_then(Value::as_str)
    }

    /// Get an item by index
    pub fn item(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// Whether any item has a conferred quantity above zero
    pub fn any_conferred(&self) -> bool {
        self.items.iter().any(|item| item.conferred_quantity > 0)
    }

    /// Whether every item is fully conferred
    pub fn all_conferred(&self) -> bool {
        self.items.iter().all(LineItem::is_conferred)
    }

    /// Number of items not yet fully conferred
    pub fn pending_items(&self) -> usize {
        self.items.iter().filter(|item| !item.is_conferred()).count()
    }

    /// Build the body for a whole-object replace
    ///
    /// Removes server-managed fields from the order and the `_id` of every
    /// item; everything else is sent back verbatim.
    pub fn replace_payload(&self) -> serde_json::Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            for field in SERVER_MANAGED_FIELDS {
                map.remove(field);
            }
            if let Some(Value::Array(items)) = map.get_mut("Itens") {
                for item in items.iter_mut() {
                    if let Value::Object(item) = item {
                        item.remove("_id");
                    }
                }
            }
        }
        Ok(value)
    }
}

/// Reads `null` as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts either a bare status ID or a populated status document
/// (`{"_id": "...", "nome": "...", "color": "..."}`) as listing endpoints return.
fn deserialize_status_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StatusField {
        Id(String),
        Populated {
            #[serde(rename = "_id")]
            id: String,
        },
    }

    let field = Option::<StatusField>::deserialize(deserializer)?;
    Ok(field.map(|f| match f {
        StatusField::Id(id) => id,
        StatusField::Populated { id } => id,
    }))
}
