use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::sections::SectionError;
use crate::text_extraction::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Evaluation itself never produces an `AppError`; model failures during
/// scoring degrade inside the `EvaluationResult` instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFileType(_) => AppError::UnsupportedFileType(err.to_string()),
            ExtractionError::Pdf(_) | ExtractionError::Docx(_) | ExtractionError::Empty(_) => {
                AppError::UnsupportedInput(err.to_string())
            }
        }
    }
}

impl From<SectionError> for AppError {
    fn from(err: SectionError) -> Self {
        match err {
            SectionError::UnsupportedInput => AppError::UnsupportedInput(err.to_string()),
            SectionError::LlmUnavailable(_) | SectionError::MalformedResponse(_) => {
                AppError::LlmUnavailable(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedInput(msg) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_INPUT", msg.clone())
            }
            AppError::UnsupportedFileType(msg) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_FILE_TYPE", msg.clone())
            }
            AppError::LlmUnavailable(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_UNAVAILABLE",
                    "The AI section parser is unavailable".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
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
