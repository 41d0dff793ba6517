use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;
use crate::domain::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Form not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::FormNotFound => AppError::NotFound,
            DomainError::LineOutOfRange { .. } => AppError::BadRequest(e.to_string()),
            DomainError::SubmissionInProgress => AppError::Conflict(e.to_string()),
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::InvalidMenu(msg) | DomainError::SubmissionAborted(msg) => {
                AppError::Internal(msg)
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        AppError::Validation(e)
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::BadRequest(_) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Conflict(_) => HttpResponse::Conflict().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Validation(errors) => {
                HttpResponse::UnprocessableEntity().json(serde_json::json!({
                    "error": self.to_string(),
                    "fields": errors.errors()
                }))
            }
            AppError::Internal(_) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            })),
        }
    }
}
