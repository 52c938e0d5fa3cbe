//! Codec error types.

use thiserror::Error;

/// Result type for `.cube` operations.
pub type CubeResult<T> = Result<T, CubeError>;

/// Errors that can occur encoding or analyzing `.cube` text.
#[derive(Debug, Error)]
pub enum CubeError {
    /// Grid shape violates the codec precondition.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// A grid value is non-finite or outside `[0, 1]`.
    #[error("value {value} at entry {index} is outside [0, 1]")]
    ValueOutOfRange {
        /// Flat grid index of the offending entry.
        index: usize,
        /// The offending channel value.
        value: f32,
    },

    /// Malformed `.cube` text.
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error while writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
