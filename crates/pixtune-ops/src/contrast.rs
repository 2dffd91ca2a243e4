//! Linear contrast around mid-gray.
//!
//! Each sample is scaled away from (or towards) the pivot 128:
//!
//! ```text
//! out = clamp(128 + (in - 128) * factor, 0, 255)
//! ```
//!
//! - `factor = 1.0` - identity
//! - `factor = 0.0` - flat mid-gray
//! - `factor > 1.0` - stronger contrast, clipped at black and white
//!
//! # Example
//!
//! ```rust
//! use pixtune_core::{PixelBuffer, RgbTriplet};
//! use pixtune_ops::contrast::contrast;
//!
//! let img = PixelBuffer::filled(2, 2, RgbTriplet::new(100, 150, 200));
//! let out = contrast(&img, 2.0).unwrap();
//! assert_eq!(out.sample(0, 0).unwrap(), RgbTriplet::new(72, 172, 255));
//! ```

use crate::point::{apply_point, PointOp};
use crate::{OpsError, OpsResult};
use pixtune_core::PixelBuffer;

/// Contrast pivot (mid-gray).
pub const PIVOT: f32 = 128.0;

/// Contrast scaling around [`PIVOT`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contrast {
    /// Scale factor (1.0 = no change).
    pub factor: f32,
}

impl Default for Contrast {
    fn default() -> Self {
        Self { factor: 1.0 }
    }
}

impl Contrast {
    /// Creates a contrast operator.
    pub fn new(factor: f32) -> Self {
        Self { factor }
    }

    /// Check if this is identity (no-op).
    pub fn is_identity(&self) -> bool {
        self.factor == 1.0
    }

    /// Rejects non-finite factors. Any finite factor is accepted; the output
    /// is always clamped.
    pub fn validate(&self) -> OpsResult<()> {
        if !self.factor.is_finite() {
            return Err(OpsError::invalid(format!(
                "contrast factor must be finite, got {}",
                self.factor
            )));
        }
        Ok(())
    }
}

impl PointOp for Contrast {
    fn name(&self) -> &'static str {
        "contrast"
    }

    #[inline]
    fn map_sample(&self, _channel: usize, sample: u8) -> u8 {
        let out = PIVOT + (sample as f32 - PIVOT) * self.factor;
        out.round().clamp(0.0, 255.0) as u8
    }
}

/// Scales contrast of every sample around mid-gray.
///
/// # Errors
///
/// - invalid parameter if `factor` is NaN or infinite
/// - empty buffer if `buffer` has zero area
pub fn contrast(buffer: &PixelBuffer, factor: f32) -> OpsResult<PixelBuffer> {
    let op = Contrast::new(factor);
    op.validate()?;
    if op.is_identity() {
        buffer.ensure_not_empty()?;
        return Ok(buffer.clone());
    }
    apply_point(buffer, &op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixtune_core::{Channels, RgbTriplet};

    #[test]
    fn test_factor_two() {
        let img = PixelBuffer::filled(2, 2, RgbTriplet::new(100, 150, 200));
        let out = contrast(&img, 2.0).unwrap();
        // 128 + (200 - 128) * 2 = 272, clipped
        assert_eq!(out.sample(1, 1).unwrap(), RgbTriplet::new(72, 172, 255));
    }

    #[test]
    fn test_identity() {
        let img = PixelBuffer::from_fn(16, 16, |x, y| {
            RgbTriplet::new((x * 16) as u8, (y * 16) as u8, (x * y) as u8)
        });
        let out = contrast(&img, 1.0).unwrap();
        assert_eq!(out, img);
        assert!(Contrast::new(1.0).is_identity());
    }

    #[test]
    fn test_zero_is_flat_gray() {
        let img = PixelBuffer::from_raw(3, 1, Channels::Gray, vec![0, 77, 255]).unwrap();
        let out = contrast(&img, 0.0).unwrap();
        assert_eq!(out.data(), &[128, 128, 128]);
    }

    #[test]
    fn test_large_factor_clamps() {
        let op = Contrast::new(1000.0);
        assert_eq!(op.map_sample(0, 0), 0);
        assert_eq!(op.map_sample(0, 128), 128);
        assert_eq!(op.map_sample(0, 129), 255);
    }

    #[test]
    fn test_rejects_nan() {
        let img = PixelBuffer::filled_gray(1, 1, 0);
        assert!(contrast(&img, f32::NAN).unwrap_err().is_invalid_parameter());
        assert!(contrast(&img, f32::INFINITY).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_empty() {
        let img = PixelBuffer::new(0, 0, Channels::Rgb);
        assert!(contrast(&img, 1.5).unwrap_err().is_empty_buffer());
        assert!(contrast(&img, 1.0).unwrap_err().is_empty_buffer());
    }
}
