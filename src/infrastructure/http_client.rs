use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::config::ServiceUrls;
use crate::domain::errors::GatewayError;
use crate::domain::menu::{Menu, MenuItemPayload};
use crate::domain::order::OrderRequest;
use crate::domain::ports::{GatewayResponse, MenuSource, OrderGateway};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GatewayError::Decode(e.to_string())
        } else {
            GatewayError::Transport(e.to_string())
        }
    }
}

// ── Menu service ─────────────────────────────────────────────────────────────

pub struct HttpMenuClient {
    client: Client,
    url: String,
}

impl HttpMenuClient {
    pub fn new(client: Client, services: &ServiceUrls) -> Self {
        Self {
            client,
            url: services.menu_url(),
        }
    }
}

#[async_trait]
impl MenuSource for HttpMenuClient {
    /// GET /api/v1/menu
    ///
    /// Only a 2xx JSON response is accepted.
    async fn fetch_menu(&self) -> Result<Menu, GatewayError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.contains("application/json") {
            return Err(GatewayError::ContentType(content_type));
        }

        let body = response.text().await?;
        let payloads: Vec<MenuItemPayload> =
            serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))?;

        Menu::from_payloads(payloads).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

// ── Order service ────────────────────────────────────────────────────────────

pub struct HttpOrderClient {
    client: Client,
    url: String,
}

impl HttpOrderClient {
    pub fn new(client: Client, services: &ServiceUrls) -> Self {
        Self {
            client,
            url: services.orders_url(),
        }
    }
}

#[async_trait]
impl OrderGateway for HttpOrderClient {
    /// POST /api/v1/orders
    ///
    /// Any HTTP answer is returned as-is; only transport failures are errors.
    async fn create_order(&self, order: &OrderRequest) -> Result<GatewayResponse, GatewayError> {
        let response = self.client.post(&self.url).json(order).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(GatewayResponse { status, body })
    }
}
