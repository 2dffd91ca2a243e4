//! Error types for pixtune-core operations.
//!
//! The [`Error`] enum covers failures of buffer construction and access:
//! malformed dimensions, unsupported channel layouts, empty buffers and
//! out-of-range pixel reads.
//!
//! # Usage
//!
//! ```rust
//! use pixtune_core::{Error, Result};
//!
//! fn check(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(3, 0, 2, 2).unwrap_err().is_bounds_error());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or reading a [`crate::PixelBuffer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    ///
    /// Returned by [`crate::PixelBuffer::sample`] when `x >= width` or
    /// `y >= height`.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// The buffer has zero width or zero height.
    #[error("empty buffer ({width}x{height})")]
    EmptyBuffer {
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// Data length does not match `width * height * channels`, or the
    /// product overflows.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Channel count other than 1 (gray) or 3 (RGB).
    #[error("unsupported channel count: {0} (expected 1 or 3)")]
    UnsupportedChannels(usize),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::EmptyBuffer`] error.
    #[inline]
    pub fn empty_buffer(width: u32, height: u32) -> Self {
        Self::EmptyBuffer { width, height }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns `true` if this error reports an empty buffer.
    #[inline]
    pub fn is_empty_buffer(&self) -> bool {
        matches!(self, Self::EmptyBuffer { .. })
    }
}
