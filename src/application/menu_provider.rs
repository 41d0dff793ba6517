use std::sync::Arc;

use crate::domain::menu::Menu;
use crate::domain::ports::MenuSource;

/// Fail-soft access to the remote menu: any failure becomes an empty menu.
#[derive(Clone)]
pub struct MenuProvider {
    source: Arc<dyn MenuSource>,
}

impl MenuProvider {
    pub fn new(source: Arc<dyn MenuSource>) -> Self {
        Self { source }
    }

    /// Fetches afresh on every call; nothing is cached.
    pub async fn fetch_menu(&self) -> Menu {
        match self.source.fetch_menu().await {
            Ok(menu) => {
                log::debug!("Loaded menu with {} items", menu.len());
                menu
            }
            Err(e) => {
                log::error!("Failed to fetch menu: {}", e);
                Menu::empty()
            }
        }
    }
}
