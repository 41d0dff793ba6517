use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::domain::order::DraftOrder;
use crate::domain::ports::{GatewayResponse, OrderGateway};
use crate::domain::validation::{validate, ValidationErrors};

pub const ORDER_CREATED: &str = "Order created successfully.";
pub const ORDER_REJECTED: &str = "The order could not be created.";
pub const COMMUNICATION_FAILED: &str = "Could not communicate with the order service.";

/// Outcome of one submission attempt, shown to the user once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<Value>,
}

impl SubmissionResult {
    fn communication_failure() -> Self {
        Self {
            success: false,
            message: Some(COMMUNICATION_FAILED.to_string()),
            data: None,
        }
    }
}

#[derive(Clone)]
pub struct SubmissionHandler {
    gateway: Arc<dyn OrderGateway>,
}

impl SubmissionHandler {
    pub fn new(gateway: Arc<dyn OrderGateway>) -> Self {
        Self { gateway }
    }

    /// Validates `draft` and, only if it is valid, sends it to the order
    /// service. No retries.
    pub async fn submit(&self, draft: &DraftOrder) -> Result<SubmissionResult, ValidationErrors> {
        let request = validate(draft)?;

        let result = match self.gateway.create_order(&request).await {
            Ok(response) => interpret_response(&response),
            Err(e) => {
                log::error!("Order submission failed: {}", e);
                SubmissionResult::communication_failure()
            }
        };
        Ok(result)
    }
}

/// Maps the order service's answer onto what the user sees.
pub fn interpret_response(response: &GatewayResponse) -> SubmissionResult {
    let body = serde_json::from_str::<Value>(&response.body);

    if response.is_success() {
        return match body {
            Ok(data) => {
                log::info!("Order accepted by order service (status {})", response.status);
                SubmissionResult {
                    success: true,
                    message: Some(ORDER_CREATED.to_string()),
                    data: Some(data),
                }
            }
            Err(e) => {
                log::error!("Order service returned an unreadable body: {}", e);
                SubmissionResult::communication_failure()
            }
        };
    }

    let data = body.ok();
    let message = data
        .as_ref()
        .and_then(server_message)
        .unwrap_or_else(|| ORDER_REJECTED.to_string());
    log::info!("Order rejected by order service (status {})", response.status);

    SubmissionResult {
        success: false,
        message: Some(message),
        data,
    }
}

fn server_message(body: &Value) -> Option<String> {
    ["detail", "error"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}
