use std::fmt;

use serde::Serialize;

use super::order::{DraftOrder, FieldPath, OrderLineRequest, OrderRequest};

pub const NAME_REQUIRED: &str = "Name is required.";
pub const ITEMS_REQUIRED: &str = "Add at least one item.";
pub const ITEM_REQUIRED: &str = "Item is required.";
pub const QUANTITY_INVALID: &str = "Enter a valid quantity.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FieldPath,
    pub message: &'static str,
}

/// Every problem found in a draft, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has(&self, field: FieldPath) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    fn push(&mut self, field: FieldPath, message: &'static str) {
        self.0.push(FieldError { field, message });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self.0.iter().map(|e| e.field.to_string()).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks the required fields and builds the wire request.
pub fn validate(draft: &DraftOrder) -> Result<OrderRequest, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let customer_name = draft.customer_name.trim();
    if customer_name.is_empty() {
        errors.push(FieldPath::CustomerName, NAME_REQUIRED);
    }
    if draft.items.is_empty() {
        errors.push(FieldPath::Items, ITEMS_REQUIRED);
    }

    let mut items = Vec::with_capacity(draft.items.len());
    for (line, input) in draft.items.iter().enumerate() {
        let item_id = input.item_id.trim();
        if item_id.is_empty() {
            errors.push(FieldPath::ItemId { line }, ITEM_REQUIRED);
        }
        match u32::try_from(input.quantity) {
            Ok(quantity) if quantity >= 1 => items.push(OrderLineRequest {
                item_id: item_id.to_string(),
                quantity,
            }),
            _ => errors.push(FieldPath::Quantity { line }, QUANTITY_INVALID),
        }
    }

    if !errors.0.is_empty() {
        return Err(errors);
    }

    Ok(OrderRequest {
        customer_name: customer_name.to_string(),
        items,
        payment_type: draft.payment_type,
    })
}
