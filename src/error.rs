//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` for the failure conditions of the browser and implements
//! Axum's `IntoResponse` so handlers can return them directly as JSON error
//! bodies.
//!
//! Not-found outcomes inside the core are `None` or empty results; the
//! `*NotFound` variants only exist for the HTTP layer to report them.
//!
//! Error mappings:
//! - `PathNotFound`, `CommitNotFound` → 404
//! - `StoreUnavailable` → 503
//! - `Git`, `InvariantViolation`, `Internal` → 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The object store failed to read a referenced object.
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    /// A tree entry's declared kind disagrees with the object it points at.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::PathNotFound(_) | AppError::CommitNotFound(_) => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Git(_) | AppError::InvariantViolation(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
