//! Error handling for the Branch Restock Portal
//!
//! Every operation reports its failure to the initiating actor through one
//! structured response shape; nothing is retried automatically.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::RejectedLine;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // Catalog errors
    #[error("No stock list has been uploaded yet")]
    CatalogUnavailable,

    #[error("Failed to parse uploaded file: {0}")]
    UploadParse(String),

    // Order intake errors
    #[error("Order batch rejected: {message}")]
    ValidationRejected {
        message: String,
        rejected: Vec<RejectedLine>,
    },

    #[error("No orders received yet")]
    NoOrders,

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    /// Offending order lines, present only for batch rejections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_lines: Option<Vec<RejectedLine>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_CREDENTIALS".to_string(),
                    message: "Invalid branch name, PIN, or admin password".to_string(),
                    rejected_lines: None,
                },
            ),
            AppError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "UNAUTHORIZED".to_string(),
                    message: message.clone(),
                    rejected_lines: None,
                },
            ),
            AppError::CatalogUnavailable => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "CATALOG_UNAVAILABLE".to_string(),
                    message: "Waiting for the admin to upload today's stock list".to_string(),
                    rejected_lines: None,
                },
            ),
            AppError::UploadParse(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "UPLOAD_PARSE_FAILURE".to_string(),
                    message: format!("Error processing file: {}", msg),
                    rejected_lines: None,
                },
            ),
            AppError::ValidationRejected { message, rejected } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "VALIDATION_REJECTED".to_string(),
                    message: message.clone(),
                    rejected_lines: Some(rejected.clone()),
                },
            ),
            AppError::NoOrders => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NO_ORDERS".to_string(),
                    message: "No orders received yet".to_string(),
                    rejected_lines: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    rejected_lines: None,
                },
            ),
            AppError::Storage(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "STORAGE_ERROR".to_string(),
                    message: format!("Storage error: {}", msg),
                    rejected_lines: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message: format!("Configuration error: {}", msg),
                    rejected_lines: None,
                },
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    rejected_lines: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
