//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use trafi_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Wrapper so that `AppError` can be returned directly from handlers.
///
/// Credential and token failures always produce a fixed message: the
/// internal detail (unknown identity vs. wrong password, superseded vs.
/// expired token) is logged server-side and never leaks to the caller.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code, message) = match err.kind {
            ErrorKind::Validation => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                err.message.clone(),
            ),
            ErrorKind::InvalidCredentials => {
                tracing::debug!(detail = %err.message, "Credential failure");
                (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    "Invalid email or password".to_string(),
                )
            }
            ErrorKind::Unauthorized => {
                tracing::debug!(detail = %err.message, "Token rejected");
                (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    "Invalid or expired token".to_string(),
                )
            }
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", err.message.clone()),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT", err.message.clone()),
            ErrorKind::TokenIssuance
            | ErrorKind::SessionPersist
            | ErrorKind::Database
            | ErrorKind::Cache
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => {
                tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Handler result alias used throughout this crate.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(AppError::validation("email is malformed")),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_credential_and_token_failures_map_to_401() {
        assert_eq!(
            status_of(AppError::invalid_credentials("unknown identity")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::unauthorized("token superseded")),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_conflict_maps_to_409() {
        assert_eq!(
            status_of(AppError::conflict("email already registered")),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_internal_kinds_map_to_500() {
        assert_eq!(
            status_of(AppError::session_persist("store write failed")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::database("pool exhausted")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
