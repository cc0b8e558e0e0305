//! HTTP request handlers.

pub mod auth;
pub mod health;

use trafi_core::error::AppError;
use validator::Validate;

use crate::error::ApiError;

/// Runs DTO validation, mapping failures to a 400-class error.
pub(crate) fn validated<T: Validate>(value: &T) -> Result<(), ApiError> {
    value
        .validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))
}
