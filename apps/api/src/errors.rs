use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    FileProcessing(String),

    #[error("{0}")]
    ModelProcessing(String),

    #[error("Report error: {0}")]
    Report(String),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFormat(name) => AppError::UnsupportedFormat(name),
            other => AppError::FileProcessing(other.to_string()),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnsupportedFormat(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::FileProcessing(_) | AppError::ModelProcessing(_) | AppError::Report(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::FileProcessing(_) => "FILE_PROCESSING_ERROR",
            AppError::ModelProcessing(_) => "MODEL_PROCESSING_ERROR",
            AppError::Report(_) => "REPORT_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(code = self.code(), "{message}");
        }

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
