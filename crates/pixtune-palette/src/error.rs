//! Error types for palette extraction.

use thiserror::Error;

/// Errors from [`crate::extract_palette`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// Palette size or quantization depth outside its domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The input buffer has no pixels.
    #[error("cannot extract a palette from an empty buffer ({width}x{height})")]
    EmptyBuffer {
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },
}

impl PaletteError {
    /// Returns `true` for [`PaletteError::InvalidParameter`].
    #[inline]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }

    /// Returns `true` for [`PaletteError::EmptyBuffer`].
    #[inline]
    pub fn is_empty_buffer(&self) -> bool {
        matches!(self, Self::EmptyBuffer { .. })
    }
}

/// Result type for palette extraction.
pub type PaletteResult<T> = Result<T, PaletteError>;
