use async_trait::async_trait;

use super::errors::GatewayError;
use super::menu::Menu;
use super::order::OrderRequest;

/// Raw answer of the order service; interpretation is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: String,
}

impl GatewayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait MenuSource: Send + Sync + 'static {
    async fn fetch_menu(&self) -> Result<Menu, GatewayError>;
}

#[async_trait]
pub trait OrderGateway: Send + Sync + 'static {
    async fn create_order(&self, order: &OrderRequest) -> Result<GatewayResponse, GatewayError>;
}
