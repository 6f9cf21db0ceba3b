//! Application error type.
//!
//! Connection and statement failures are deliberately not told apart: both
//! arrive as [`AppError::Database`] carrying the driver's own message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ApiResponse;

/// Result alias used across the workspace.
pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced by the node.
#[derive(Debug, Error)]
pub enum AppError {
    /// Driver failure while connecting, executing or closing.
    #[error("{0}")]
    Database(String),

    /// Request payload failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Blocking task or other internal failure.
    #[error("internal error: {0}")]
    Internal(String),

    /// A single item failed and the batch was aborted.
    #[error("{source}")]
    ItemFailed {
        /// Index of the input item that failed.
        item_index: usize,
        /// The original failure.
        source: Box<AppError>,
    },
}

impl AppError {
    /// Wraps an error with the index of the item that produced it.
    pub fn for_item(self, item_index: usize) -> Self {
        AppError::ItemFailed {
            item_index,
            source: Box::new(self),
        }
    }

    /// Stable error code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::ItemFailed { .. } => "NODE_OPERATION_ERROR",
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Item index attached to the error, if any.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            AppError::ItemFailed { item_index, .. } => Some(*item_index),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.item_index() {
            Some(index) => ApiResponse::err_with_details(
                self.code(),
                self.to_string(),
                serde_json::json!({ "itemIndex": index }),
            ),
            None => ApiResponse::err(self.code(), self.to_string()),
        };
        (status, Json(body)).into_response()
    }
}
