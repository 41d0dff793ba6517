use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    #[default]
    Manual,
    Online,
}

/// One line of the draft. `quantity` holds whatever the user typed; it is
/// only checked at submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineInput {
    pub item_id: String,
    pub quantity: i64,
}

impl OrderLineInput {
    pub fn blank() -> Self {
        Self {
            item_id: String::new(),
            quantity: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOrder {
    pub customer_name: String,
    pub items: Vec<OrderLineInput>,
    pub payment_type: PaymentType,
}

impl Default for DraftOrder {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            items: vec![OrderLineInput::blank()],
            payment_type: PaymentType::Manual,
        }
    }
}

/// Addressable fields of a [`DraftOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    CustomerName,
    Items,
    ItemId { line: usize },
    Quantity { line: usize },
    PaymentType,
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::CustomerName => f.write_str("customer_name"),
            FieldPath::Items => f.write_str("items"),
            FieldPath::ItemId { line } => write!(f, "items.{line}.item_id"),
            FieldPath::Quantity { line } => write!(f, "items.{line}.quantity"),
            FieldPath::PaymentType => f.write_str("payment_type"),
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single edit to the draft, typed per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    CustomerName(String),
    ItemId { line: usize, item_id: String },
    Quantity { line: usize, quantity: i64 },
    PaymentType(PaymentType),
}

/// Validated order, ready for the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub customer_name: String,
    pub items: Vec<OrderLineRequest>,
    pub payment_type: PaymentType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLineRequest {
    pub item_id: String,
    pub quantity: u32,
}
