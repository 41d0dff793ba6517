use bigdecimal::BigDecimal;

use super::menu::Menu;
use super::order::OrderLineInput;

const CURRENCY_SCALE: i64 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub item_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: BigDecimal,
    pub subtotal: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub total: BigDecimal,
}

/// Prices every line that resolves in `menu`. Lines without a matching item
/// are left out of the breakdown and add nothing to the total. Only displayed
/// amounts are rounded; the total is summed from exact line amounts.
pub fn summarize(items: &[OrderLineInput], menu: &Menu) -> OrderSummary {
    let mut total = BigDecimal::from(0);
    let mut lines = Vec::new();

    for line in items {
        let Some(item) = menu.find(&line.item_id) else {
            continue;
        };
        let subtotal = &item.price * BigDecimal::from(line.quantity);
        total += &subtotal;
        lines.push(SummaryLine {
            item_id: item.item_id.clone(),
            name: item.name.clone(),
            quantity: line.quantity,
            unit_price: to_currency(&item.price),
            subtotal: to_currency(&subtotal),
        });
    }

    OrderSummary {
        lines,
        total: to_currency(&total),
    }
}

fn to_currency(amount: &BigDecimal) -> BigDecimal {
    amount.round(CURRENCY_SCALE).with_scale(CURRENCY_SCALE)
}
