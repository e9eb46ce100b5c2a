//! Error types for the tabular server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::engine::EngineError;
use crate::ocr::OcrError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
///
/// The `#[error]` strings double as the wire-level messages, so the exact
/// wording here is part of the API.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No file provided.")]
    MissingFile,

    #[error("No selected file.")]
    EmptyFilename,

    #[error("Failed to read upload: {0}")]
    Upload(String),

    #[error("Failed to stage upload: {0}")]
    Staging(#[from] std::io::Error),

    #[error("OCR preprocessing failed: {0}")]
    Ocr(#[from] OcrError),

    #[error("Failed to extract tables: {0}")]
    Extraction(#[from] EngineError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingFile | AppError::EmptyFilename | AppError::Upload(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Staging(e) => {
                tracing::error!("staging error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Ocr(e) => {
                tracing::error!("OCR error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Extraction(e) => {
                tracing::error!("extraction error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
