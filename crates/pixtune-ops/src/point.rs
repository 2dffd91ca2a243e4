//! Per-sample point operators.
//!
//! A point operator maps each 8-bit sample to a new sample without looking at
//! its neighbours. Because an 8-bit sample has only 256 values, every point
//! operator is sampled into a [`Lut8`] once per invocation and then applied by
//! table lookup.
//!
//! Any `Fn(u8) -> u8` closure is a point operator:
//!
//! ```rust
//! use pixtune_core::{PixelBuffer, RgbTriplet};
//! use pixtune_ops::point::apply_point;
//!
//! let img = PixelBuffer::filled(2, 2, RgbTriplet::new(10, 100, 250));
//! let halved = apply_point(&img, &|s: u8| s / 2).unwrap();
//! assert_eq!(halved.sample(1, 1).unwrap(), RgbTriplet::new(5, 50, 125));
//! ```

use crate::OpsResult;
use pixtune_core::PixelBuffer;
use pixtune_lut::{Lut8, LUT_SIZE};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// A stateless `(channel, sample) -> sample` mapping.
pub trait PointOp {
    /// Short operator name used in logs and errors.
    fn name(&self) -> &'static str {
        "point"
    }

    /// Maps one sample of `channel` (0 = R or gray, 1 = G, 2 = B).
    fn map_sample(&self, channel: usize, sample: u8) -> u8;

    /// Returns `true` if [`Self::map_sample`] depends on the channel.
    fn per_channel(&self) -> bool {
        false
    }

    /// Samples the operator into a lookup table.
    fn to_lut(&self) -> Lut8 {
        let table = |channel: usize| {
            let mut t = [0u8; LUT_SIZE];
            for (v, out) in t.iter_mut().enumerate() {
                *out = self.map_sample(channel, v as u8);
            }
            t
        };
        if self.per_channel() {
            Lut8::from_rgb(table(0), table(1), table(2))
        } else {
            Lut8 {
                r: table(0),
                g: None,
                b: None,
            }
        }
    }
}

impl<F> PointOp for F
where
    F: Fn(u8) -> u8,
{
    fn map_sample(&self, _channel: usize, sample: u8) -> u8 {
        self(sample)
    }
}

/// Applies a lookup table to every sample of `buffer`.
///
/// Sample `k` of each pixel is looked up in the table of channel `k`; mono
/// tables apply to every channel.
pub fn apply_lut(buffer: &PixelBuffer, lut: &Lut8) -> OpsResult<PixelBuffer> {
    buffer.ensure_not_empty()?;
    Ok(buffer.map_pixels(|src, dst| {
        for (c, (d, s)) in dst.iter_mut().zip(src).enumerate() {
            *d = lut.apply_channel(c, *s);
        }
    }))
}

/// Applies a point operator to every sample of `buffer`.
///
/// # Errors
///
/// Fails with an empty-buffer error if `buffer` has zero area.
pub fn apply_point<P>(buffer: &PixelBuffer, op: &P) -> OpsResult<PixelBuffer>
where
    P: PointOp + ?Sized,
{
    let (width, height) = buffer.dimensions();
    trace!(width, height, op = op.name(), "point::apply");
    apply_lut(buffer, &op.to_lut())
}
