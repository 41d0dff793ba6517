use std::collections::HashSet;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Menu entry as published by the menu service.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemPayload {
    pub item_id: String,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub item_id: String,
    pub name: String,
    pub price: BigDecimal,
}

impl TryFrom<MenuItemPayload> for MenuItem {
    type Error = DomainError;

    fn try_from(p: MenuItemPayload) -> Result<Self, Self::Error> {
        if !p.price.is_finite() || p.price < 0.0 {
            return Err(DomainError::InvalidMenu(format!(
                "item '{}' has invalid price {}",
                p.item_id, p.price
            )));
        }
        // f64's Display is the shortest round-tripping form, so 25.9 stays 25.9.
        let price = BigDecimal::from_str(&p.price.to_string())
            .map_err(|e| DomainError::InvalidMenu(format!("item '{}': {}", p.item_id, e)))?;
        Ok(MenuItem {
            item_id: p.item_id,
            name: p.name,
            price,
        })
    }
}

/// Read-only list of purchasable items with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a menu keeping the first occurrence of each `item_id`.
    pub fn new(items: Vec<MenuItem>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.item_id.clone());
                if !fresh {
                    log::warn!("Dropping duplicate menu item id '{}'", item.item_id);
                }
                fresh
            })
            .collect();
        Self { items }
    }

    pub fn from_payloads(payloads: Vec<MenuItemPayload>) -> Result<Self, DomainError> {
        let items = payloads
            .into_iter()
            .map(MenuItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(items))
    }

    pub fn find(&self, item_id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.item_id == item_id)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
