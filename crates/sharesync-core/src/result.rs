//! Convenience result type alias for ShareSync.

use crate::error::AppError;

/// A specialized `Result` type for ShareSync operations.
pub type AppResult<T> = Result<T, AppError>;
