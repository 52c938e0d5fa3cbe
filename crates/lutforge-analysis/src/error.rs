//! Analysis error types.

use thiserror::Error;

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that can occur during image analysis and color transfer.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The named look is not in the catalog. Unlike an unknown tint
    /// color, this is a hard error.
    #[error("unknown look: {0}")]
    UnknownLook(String),

    /// The image has no pixels.
    #[error("image is empty")]
    EmptyImage,

    /// The statistical transfer degenerated (e.g. near-zero variance).
    /// Recovered internally by the adaptive-blend fallback; callers of
    /// the adapter never see this.
    #[error("transfer degenerated: {0}")]
    TransferDegenerate(String),
}
