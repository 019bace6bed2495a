use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::error::ResumeError;
use crate::generation::validation::FieldIssue;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation timed out after {0}s")]
    Timeout(u64),

    #[error(transparent)]
    Generation(#[from] ResumeError),
}

impl AppError {
    /// Folds field issues into one message, `field: message; ...`.
    pub fn invalid_fields(issues: &[FieldIssue]) -> Self {
        let message = issues
            .iter()
            .map(|issue| format!("{}: {}", issue.field, issue.message))
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Validation(message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Timeout(secs) => {
                tracing::error!("Resume generation exceeded {secs}s");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "GENERATION_TIMEOUT",
                    "Resume generation took too long".to_string(),
                )
            }
            AppError::Generation(e) => {
                tracing::error!("Resume generation failed: {e}");
                match e {
                    ResumeError::GenerationBackend(_) => (
                        StatusCode::BAD_GATEWAY,
                        "LLM_ERROR",
                        "The text generation service failed".to_string(),
                    ),
                    ResumeError::MalformedResponse { .. } | ResumeError::ContractViolation { .. } => (
                        StatusCode::BAD_GATEWAY,
                        "INVALID_MODEL_OUTPUT",
                        "The generated content could not be used".to_string(),
                    ),
                    ResumeError::Rendering(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "RENDER_ERROR",
                        "The resume could not be rendered".to_string(),
                    ),
                    ResumeError::Prompt(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal server error occurred".to_string(),
                    ),
                }
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
