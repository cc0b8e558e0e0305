//! Convenience result type alias for TrafiAuth.

use crate::error::AppError;

/// A specialized `Result` type for TrafiAuth operations.
pub type AppResult<T> = Result<T, AppError>;
