//! Error types for image operations.

use pixtune_core::Error as CoreError;
use pixtune_lut::LutError;
use thiserror::Error;

/// Error type for a single operator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    /// Operator argument outside its domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffer-level failure (empty input, out-of-bounds access).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Tone-curve control points were rejected.
    #[error(transparent)]
    Lut(#[from] LutError),
}

impl OpsError {
    /// Creates an [`OpsError::InvalidParameter`] error.
    #[inline]
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Returns `true` for [`OpsError::InvalidParameter`].
    #[inline]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }

    /// Returns `true` if the operator was given an empty buffer.
    #[inline]
    pub fn is_empty_buffer(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_empty_buffer())
    }

    /// Returns `true` if tone-curve control points were rejected.
    #[inline]
    pub fn is_invalid_control_points(&self) -> bool {
        matches!(self, Self::Lut(e) if e.is_invalid_control_points())
    }
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// A pipeline step failed.
///
/// Carries the zero-based position and name of the failing step; the
/// operator error is available through [`std::error::Error::source`].
#[derive(Error, Debug, Clone, PartialEq)]
#[error("pipeline step {index} ({op}) failed")]
pub struct PipelineError {
    /// Zero-based index of the failing step
    pub index: usize,
    /// Operator name of the failing step
    pub op: &'static str,
    /// Operator failure
    #[source]
    pub source: OpsError,
}

impl PipelineError {
    /// Index of the failing step.
    #[inline]
    pub fn step_index(&self) -> usize {
        self.index
    }

    /// The operator error that stopped the pipeline.
    #[inline]
    pub fn cause(&self) -> &OpsError {
        &self.source
    }
}
