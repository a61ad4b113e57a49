//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::auth::AuthError;
use crate::domain::error::ErrorClass;
use crate::domain::TransferError;
use crate::store::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    // Server errors (5xx)
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

const INTERNAL_MESSAGE: &str = "Internal server error";

impl AppError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Transfer(err) => match err.class() {
                ErrorClass::Unauthorized => StatusCode::UNAUTHORIZED,
                ErrorClass::ClientInput | ErrorClass::WriteRejected => StatusCode::BAD_REQUEST,
                ErrorClass::NotFound => StatusCode::NOT_FOUND,
            },
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::Transfer(err) => {
                if err.is_validation_error() {
                    tracing::debug!(status = %status, "Transfer rejected: {}", err);
                } else {
                    tracing::info!(status = %status, "Transfer failed: {}", err);
                }
                err.to_string()
            }
            AppError::Auth(err) => {
                tracing::debug!("Authentication failed: {}", err);
                AuthError::PUBLIC_MESSAGE.to_string()
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                INTERNAL_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let status = |e: TransferError| AppError::from(e).status();

        assert_eq!(status(TransferError::InvalidIdentifier), StatusCode::UNAUTHORIZED);
        assert_eq!(status(TransferError::IdentityMismatch), StatusCode::UNAUTHORIZED);
        assert_eq!(status(TransferError::MissingField("amount")), StatusCode::BAD_REQUEST);
        assert_eq!(status(TransferError::InvalidAmount), StatusCode::BAD_REQUEST);
        assert_eq!(status(TransferError::SelfTransfer), StatusCode::BAD_REQUEST);
        assert_eq!(status(TransferError::ReceiverNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status(TransferError::TransferNotCompleted), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_errors_are_opaque() {
        let err = AppError::from(StoreError::Unavailable("pool exhausted".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
