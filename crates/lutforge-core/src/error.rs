//! Core error types.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur constructing core types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Grid data length does not match the declared size.
    #[error("invalid grid size: {0}")]
    InvalidSize(String),

    /// Image buffer length does not match the declared dimensions.
    #[error("invalid image dimensions: {0}")]
    InvalidDimensions(String),
}
