use axum::{http::StatusCode, response::Json};
use tracing::{info, warn};

use crate::api::ApiResponse;

/// Centralized error types for consistent API error handling.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Lookup already in progress: {0}")]
    LookupBusy(String),
}

/// Error context for structured logging.
#[derive(Debug)]
pub struct ErrorContext {
    pub operation: String,
    pub resource: String,
    pub detail: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: &str, resource: &str) -> Self {
        Self {
            operation: operation.to_string(),
            resource: resource.to_string(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: &str) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}

impl ApiError {
    /// Convert to an HTTP response with consistent structure and logging.
    pub fn to_response_with_context(
        self,
        context: ErrorContext,
    ) -> (StatusCode, Json<ApiResponse<()>>) {
        match &self {
            ApiError::NotFound(_) => {
                info!(
                    operation = %context.operation,
                    resource = %context.resource,
                    detail = ?context.detail,
                    error = %self,
                    "Resource not found"
                );
                (
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::error(self.to_string())),
                )
            }
            ApiError::ValidationError(_) => {
                warn!(
                    operation = %context.operation,
                    resource = %context.resource,
                    detail = ?context.detail,
                    error = %self,
                    "Validation error"
                );
                (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(self.to_string())),
                )
            }
            ApiError::LookupBusy(_) => {
                warn!(
                    operation = %context.operation,
                    resource = %context.resource,
                    detail = ?context.detail,
                    error = %self,
                    "Lookup already in progress"
                );
                (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::error(self.to_string())),
                )
            }
        }
    }
}
