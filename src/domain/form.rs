use super::errors::DomainError;
use super::order::{DraftOrder, FieldUpdate, OrderLineInput};

/// Mutable draft behind one order form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    draft: DraftOrder,
}

impl OrderForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &DraftOrder {
        &self.draft
    }

    pub fn add_line(&mut self) {
        self.draft.items.push(OrderLineInput::blank());
    }

    /// Removing the last line is allowed; submission validation rejects an
    /// empty order.
    pub fn remove_line(&mut self, index: usize) -> Result<OrderLineInput, DomainError> {
        self.check_line(index)?;
        Ok(self.draft.items.remove(index))
    }

    pub fn set_field(&mut self, update: FieldUpdate) -> Result<(), DomainError> {
        match update {
            FieldUpdate::CustomerName(name) => self.draft.customer_name = name,
            FieldUpdate::ItemId { line, item_id } => self.line_mut(line)?.item_id = item_id,
            FieldUpdate::Quantity { line, quantity } => self.line_mut(line)?.quantity = quantity,
            FieldUpdate::PaymentType(payment_type) => self.draft.payment_type = payment_type,
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.draft = DraftOrder::default();
    }

    fn check_line(&self, index: usize) -> Result<(), DomainError> {
        let len = self.draft.items.len();
        if index >= len {
            return Err(DomainError::LineOutOfRange { index, len });
        }
        Ok(())
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut OrderLineInput, DomainError> {
        self.check_line(index)?;
        Ok(&mut self.draft.items[index])
    }
}
