//! Channel inversion (photographic negative).

use crate::point::{apply_point, PointOp};
use crate::OpsResult;
use pixtune_core::PixelBuffer;

/// Replaces every sample `s` with `255 - s`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Invert;

impl PointOp for Invert {
    fn name(&self) -> &'static str {
        "invert"
    }

    #[inline]
    fn map_sample(&self, _channel: usize, sample: u8) -> u8 {
        255 - sample
    }
}

/// Inverts every sample of `buffer`.
///
/// Invert is its own inverse.
///
/// ```rust
/// use pixtune_core::{PixelBuffer, RgbTriplet};
/// use pixtune_ops::invert::invert;
///
/// let white = PixelBuffer::filled(1, 1, RgbTriplet::new(255, 255, 255));
/// let black = invert(&white).unwrap();
/// assert_eq!(black.sample(0, 0).unwrap(), RgbTriplet::new(0, 0, 0));
/// ```
pub fn invert(buffer: &PixelBuffer) -> OpsResult<PixelBuffer> {
    apply_point(buffer, &Invert)
}
