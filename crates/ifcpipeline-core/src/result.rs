//! Convenience result type alias for the IFC Pipeline client.

use crate::error::AppError;

/// A specialized `Result` type for IFC Pipeline operations.
pub type AppResult<T> = Result<T, AppError>;
