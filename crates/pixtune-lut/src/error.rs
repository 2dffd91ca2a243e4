//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while building curves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LutError {
    /// Tone-curve control points are empty or repeat an input value.
    #[error("invalid control points: {0}")]
    InvalidControlPoints(String),
}

impl LutError {
    /// Returns `true` for [`LutError::InvalidControlPoints`].
    #[inline]
    pub fn is_invalid_control_points(&self) -> bool {
        matches!(self, Self::InvalidControlPoints(_))
    }
}
