use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::order_form_service::OrderFormService;
use crate::domain::menu::MenuItem;

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuItemResponse {
    pub item_id: String,
    pub name: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "25.9"
    pub price: String,
}

impl From<&MenuItem> for MenuItemResponse {
    fn from(item: &MenuItem) -> Self {
        Self {
            item_id: item.item_id.clone(),
            name: item.name.clone(),
            price: item.price.to_string(),
        }
    }
}

/// GET /menu
///
/// Fetches the menu afresh. An unreachable or broken menu service yields an
/// empty list, never an error.
#[utoipa::path(
    get,
    path = "/menu",
    responses(
        (status = 200, description = "Purchasable items", body = Vec<MenuItemResponse>),
    ),
    tag = "menu"
)]
pub async fn get_menu(service: web::Data<OrderFormService>) -> HttpResponse {
    let menu = service.load_menu().await;
    let items: Vec<MenuItemResponse> = menu.items().iter().map(MenuItemResponse::from).collect();
    HttpResponse::Ok().json(items)
}
