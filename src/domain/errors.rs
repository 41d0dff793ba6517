use thiserror::Error;

use super::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Form not found")]
    FormNotFound,
    #[error("Line {index} is out of range (form has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },
    #[error("A submission is already in progress for this form")]
    SubmissionInProgress,
    #[error("Submission aborted: {0}")]
    SubmissionAborted(String),
    #[error("Invalid menu: {0}")]
    InvalidMenu(String),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

/// Failures talking to the remote menu and order services.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Unexpected status: {0}")]
    Status(u16),
    #[error("Unexpected content type: {0}")]
    ContentType(String),
    #[error("Invalid response body: {0}")]
    Decode(String),
}
