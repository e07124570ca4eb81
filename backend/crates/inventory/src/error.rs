//! Inventory Error Types
//!
//! Inventory-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Inventory-specific result type alias
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Message returned for every 5xx response
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Inventory-specific error variants
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Bad input, wrong image type, malformed multipart
    #[error("{0}")]
    Validation(String),

    /// Item does not exist (answered with an empty 404)
    #[error("Item not found")]
    ItemNotFound,

    /// Supplier tried to change an item it does not own
    #[error("You can only update your own items.")]
    NotPermitted,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Image file I/O error
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl InventoryError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            InventoryError::Validation(_) => StatusCode::BAD_REQUEST,
            InventoryError::ItemNotFound => StatusCode::NOT_FOUND,
            InventoryError::NotPermitted => StatusCode::FORBIDDEN,
            InventoryError::Database(_)
            | InventoryError::Storage(_)
            | InventoryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            InventoryError::Validation(_) => ErrorKind::BadRequest,
            InventoryError::ItemNotFound => ErrorKind::NotFound,
            InventoryError::NotPermitted => ErrorKind::Forbidden,
            InventoryError::Database(_)
            | InventoryError::Storage(_)
            | InventoryError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details never reach the client.
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        if kind.is_server_error() {
            AppError::new(kind, UNEXPECTED_ERROR_MESSAGE)
        } else {
            AppError::new(kind, self.to_string())
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            InventoryError::Database(e) => {
                tracing::error!(error = %e, "Inventory database error");
            }
            InventoryError::Storage(e) => {
                tracing::error!(error = %e, "Image storage error");
            }
            InventoryError::Internal(msg) => {
                tracing::error!(message = %msg, "Inventory internal error");
            }
            InventoryError::NotPermitted => {
                tracing::warn!("Supplier update rejected by ownership check");
            }
            _ => {
                tracing::debug!(error = %self, "Inventory error");
            }
        }
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        self.log();
        match self {
            InventoryError::ItemNotFound => StatusCode::NOT_FOUND.into_response(),
            other => other.to_app_error().into_response(),
        }
    }
}
