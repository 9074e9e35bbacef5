//! Error types for the library API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::ResourceKind;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("The {0} could not be found.")]
    NotFound(ResourceKind),

    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error payload: a single message, or the list of validation messages
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

/// Error response body
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// A message string, or an array of validation messages
    #[schema(value_type = Object)]
    pub error: ErrorMessage,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownResourceType(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Body sent to the client. Infrastructure details are logged, not returned.
    pub fn body(self) -> ErrorResponse {
        let error = match self {
            AppError::NotFound(kind) => {
                ErrorMessage::One(format!("The {} could not be found.", kind.label()))
            }
            AppError::Validation(messages) => ErrorMessage::Many(messages),
            AppError::UnknownResourceType(tag) => {
                tracing::error!("Unknown resource type requested: {}", tag);
                ErrorMessage::One("Internal server error".to_string())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                ErrorMessage::One("Internal server error".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorMessage::One("Internal server error".to_string())
            }
        };
        ErrorResponse { error }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.body())).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
