//! Grading error types.

use thiserror::Error;

/// Result type for grading operations.
pub type GradeResult<T> = Result<T, GradeError>;

/// Errors that can occur validating or applying a grade.
#[derive(Debug, Error)]
pub enum GradeError {
    /// A parameter record field is outside its documented domain.
    ///
    /// Rejected before pipeline execution; the numeric stages assume
    /// validated coefficients.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
