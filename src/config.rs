//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `API_BASE_MENU` - Base URL of the menu service
//! - `API_BASE_ORDERS` - Base URL of the order service
//!
//! ## Optional
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 8080)
//! - `FORM_TTL_MINUTES` - Minutes an untouched form is kept (default: 60)

use std::env;

use chrono::Duration;
use thiserror::Error;

use crate::application::form_registry::DEFAULT_FORM_TTL_MINUTES;

const MENU_PATH: &str = "/api/v1/menu";
const ORDERS_PATH: &str = "/api/v1/orders";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the remote services live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUrls {
    pub menu_base: String,
    pub orders_base: String,
}

impl ServiceUrls {
    pub fn new(menu_base: impl Into<String>, orders_base: impl Into<String>) -> Self {
        Self {
            menu_base: menu_base.into(),
            orders_base: orders_base.into(),
        }
    }

    pub fn menu_url(&self) -> String {
        join(&self.menu_base, MENU_PATH)
    }

    pub fn orders_url(&self) -> String {
        join(&self.orders_base, ORDERS_PATH)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub services: ServiceUrls,
    pub form_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };

        let menu_base = base_url("API_BASE_MENU", required("API_BASE_MENU")?)?;
        let orders_base = base_url("API_BASE_ORDERS", required("API_BASE_ORDERS")?)?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), format!("{e}")))?,
            None => 8080,
        };
        let ttl_minutes = match lookup("FORM_TTL_MINUTES") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|m| *m > 0)
                .ok_or_else(|| {
                    ConfigError::InvalidEnvVar(
                        "FORM_TTL_MINUTES".to_string(),
                        "must be a positive number of minutes".to_string(),
                    )
                })?,
            None => DEFAULT_FORM_TTL_MINUTES,
        };

        Ok(Self {
            host,
            port,
            services: ServiceUrls::new(menu_base, orders_base),
            form_ttl: Duration::minutes(ttl_minutes),
        })
    }
}

fn base_url(key: &str, value: String) -> Result<String, ConfigError> {
    let value = value.trim();
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must start with http:// or https://".to_string(),
        ));
    }
    Ok(value.to_string())
}

fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
