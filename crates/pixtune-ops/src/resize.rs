//! Image upsampling with a separable Lanczos-3 filter.
//!
//! The output size is `floor(width * scale) x floor(height * scale)`. Each
//! output sample is a normalized, windowed-sinc weighted sum of the source
//! samples around its center, computed horizontally and then vertically.
//! Source coordinates outside the image are clamped to the nearest edge
//! pixel.
//!
//! Filter weights are computed once per output column/row and every sum is
//! accumulated in a fixed order, so identical input gives bit-identical output
//! with or without the `parallel` feature.
//!
//! # Strategies
//!
//! - [`ResizeStrategy::Lanczos`] - this module's filter
//! - [`ResizeStrategy::Learned`] - an injected [`Upscaler`], typically a
//!   super-resolution model loaded by the caller
//!
//! # Example
//!
//! ```rust
//! use pixtune_core::{PixelBuffer, RgbTriplet};
//! use pixtune_ops::resize::resize;
//!
//! let img = PixelBuffer::filled(3, 2, RgbTriplet::new(40, 80, 120));
//! let big = resize(&img, 2.5).unwrap();
//! assert_eq!(big.dimensions(), (7, 5));
//! assert_eq!(big.sample(6, 4).unwrap(), RgbTriplet::new(40, 80, 120));
//! ```

use crate::{OpsError, OpsResult};
use pixtune_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of Lanczos lobes.
pub const LANCZOS_LOBES: f32 = 3.0;

/// Upscaling factor used when none is given.
pub const DEFAULT_SCALE: f32 = 2.0;

/// How a resize step produces its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResizeStrategy {
    /// Separable Lanczos-3 resampling.
    #[default]
    Lanczos,
    /// Delegate to the pipeline's [`Upscaler`].
    Learned,
}

/// An externally supplied upscaling operator.
///
/// The pipeline never loads or caches models itself: the caller loads the
/// model once, wraps it in an `Upscaler` and hands it to
/// [`crate::Pipeline::with_upscaler`].
///
/// Any `Fn(&PixelBuffer) -> OpsResult<PixelBuffer>` closure is an upscaler:
///
/// ```rust
/// use pixtune_core::PixelBuffer;
/// use pixtune_ops::resize::{resize, Upscaler};
///
/// let lanczos_x2 = |img: &PixelBuffer| resize(img, 2.0);
/// let img = PixelBuffer::filled_gray(4, 4, 9);
/// assert_eq!(lanczos_x2.upscale(&img).unwrap().width(), 8);
/// ```
pub trait Upscaler: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str {
        "external"
    }

    /// Produces the upscaled image.
    fn upscale(&self, input: &PixelBuffer) -> OpsResult<PixelBuffer>;
}

impl<F> Upscaler for F
where
    F: Fn(&PixelBuffer) -> OpsResult<PixelBuffer> + Send + Sync,
{
    fn upscale(&self, input: &PixelBuffer) -> OpsResult<PixelBuffer> {
        self(input)
    }
}

/// Lanczos weight function.
#[inline]
pub fn lanczos_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < LANCZOS_LOBES {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / LANCZOS_LOBES;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Validates `scale` and returns the output size for a `width x height` input.
///
/// ```rust
/// use pixtune_ops::resize::scaled_dimensions;
///
/// assert_eq!(scaled_dimensions(640, 480, 1.5).unwrap(), (960, 720));
/// assert_eq!(scaled_dimensions(3, 3, 0.5).unwrap(), (1, 1));
/// assert!(scaled_dimensions(3, 3, 0.0).is_err());
/// ```
pub fn scaled_dimensions(width: u32, height: u32, scale: f32) -> OpsResult<(u32, u32)> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(OpsError::invalid(format!(
            "scale factor must be a finite number > 0, got {scale}"
        )));
    }
    let scaled = |len: u32| -> OpsResult<u32> {
        let v = (len as f64 * scale as f64).floor();
        if v > u32::MAX as f64 {
            return Err(OpsError::invalid(format!(
                "scale factor {scale} overflows dimension {len}"
            )));
        }
        Ok(v as u32)
    };
    Ok((scaled(width)?, scaled(height)?))
}

/// Resizes `buffer` by `scale` with Lanczos-3 resampling.
///
/// Tiny inputs with small factors may produce a zero-sized buffer, which the
/// next operator rejects as empty.
///
/// # Errors
///
/// - invalid parameter if `scale` is not a finite number > 0
/// - empty buffer if `buffer` has zero area
pub fn resize(buffer: &PixelBuffer, scale: f32) -> OpsResult<PixelBuffer> {
    let (dst_w, dst_h) = scaled_dimensions(buffer.width(), buffer.height(), scale)?;
    resize_to(buffer, dst_w, dst_h)
}

/// Resizes `buffer` to exactly `dst_w x dst_h` with Lanczos-3 resampling.
///
/// # Errors
///
/// - invalid parameter if the output or intermediate sample count does not
///   fit in memory addressing
/// - empty buffer if `buffer` has zero area
pub fn resize_to(buffer: &PixelBuffer, dst_w: u32, dst_h: u32) -> OpsResult<PixelBuffer> {
    buffer.ensure_not_empty()?;
    let (src_w, src_h) = buffer.dimensions();
    let channels = buffer.channels();
    trace!(src_w, src_h, dst_w, dst_h, "resize");

    // Horizontal pass holds dst_w x src_h f32 samples, the output dst_w x dst_h bytes
    let c = channels.count();
    let samples = |w: u32, h: u32, size: usize| {
        (w as usize)
            .checked_mul(h as usize)
            .and_then(|n| n.checked_mul(c))
            .and_then(|n| n.checked_mul(size))
            .filter(|&n| n <= isize::MAX as usize)
    };
    if samples(dst_w, src_h, size_of::<f32>()).is_none() || samples(dst_w, dst_h, 1).is_none() {
        return Err(OpsError::invalid(format!(
            "resize to {dst_w}x{dst_h} from {src_w}x{src_h} is too large"
        )));
    }

    if dst_w == 0 || dst_h == 0 {
        debug!(dst_w, dst_h, "resize produced an empty buffer");
        return Ok(PixelBuffer::new(dst_w, dst_h, channels));
    }

    let (src_w, src_h, dst_w_us, dst_h_us) =
        (src_w as usize, src_h as usize, dst_w as usize, dst_h as usize);

    // Two-pass separable resize: horizontal then vertical
    let temp = resize_horizontal(buffer.data(), src_w, src_h, c, dst_w_us);
    let data = resize_vertical(&temp, dst_w_us, src_h, c, dst_h_us);

    Ok(PixelBuffer::from_raw(dst_w, dst_h, channels, data)?)
}

/// Filter taps for one output position.
struct Taps {
    /// First source index (before edge clamping).
    start: isize,
    /// Normalized weights for `start..start + weights.len()`.
    weights: Vec<f32>,
}

/// Computes normalized filter taps for every output position along one axis.
fn contributions(src_len: usize, dst_len: usize) -> Vec<Taps> {
    let scale = src_len as f32 / dst_len as f32;
    // Widen the kernel when shrinking so it still covers every source pixel
    let filter_scale = scale.max(1.0);
    let support = LANCZOS_LOBES * filter_scale;

    (0..dst_len)
        .map(|x| {
            let center = (x as f32 + 0.5) * scale - 0.5;
            let left = (center - support).floor() as isize;
            let right = (center + support).ceil() as isize;

            let mut weights: Vec<f32> = (left..=right)
                .map(|sx| lanczos_weight((sx as f32 - center) / filter_scale))
                .collect();
            let sum: f32 = weights.iter().sum();
            if sum.abs() > f32::EPSILON {
                for w in &mut weights {
                    *w /= sum;
                }
            }
            Taps {
                start: left,
                weights,
            }
        })
        .collect()
}

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// Horizontal pass: `u8` rows to `f32` rows of width `dst_w`.
fn resize_horizontal(src: &[u8], src_w: usize, src_h: usize, c: usize, dst_w: usize) -> Vec<f32> {
    let taps = contributions(src_w, dst_w);
    let mut dst = vec![0.0f32; dst_w * src_h * c];

    let row_op = |(y, row): (usize, &mut [f32])| {
        let src_row = &src[y * src_w * c..(y + 1) * src_w * c];
        for (x, tap) in taps.iter().enumerate() {
            for ch in 0..c {
                let mut acc = 0.0f32;
                for (k, w) in tap.weights.iter().enumerate() {
                    let sx = clamp_index(tap.start + k as isize, src_w);
                    acc += src_row[sx * c + ch] as f32 * w;
                }
                row[x * c + ch] = acc;
            }
        }
    };

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(dst_w * c).enumerate().for_each(row_op);
    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(dst_w * c).enumerate().for_each(row_op);

    dst
}

/// Vertical pass: `f32` columns of height `src_h` to `u8` of height `dst_h`.
fn resize_vertical(src: &[f32], width: usize, src_h: usize, c: usize, dst_h: usize) -> Vec<u8> {
    let taps = contributions(src_h, dst_h);
    let row_len = width * c;
    let mut dst = vec![0u8; row_len * dst_h];

    let row_op = |(y, row): (usize, &mut [u8])| {
        let tap = &taps[y];
        for (i, out) in row.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, w) in tap.weights.iter().enumerate() {
                let sy = clamp_index(tap.start + k as isize, src_h);
                acc += src[sy * row_len + i] * w;
            }
            *out = acc.round().clamp(0.0, 255.0) as u8;
        }
    };

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(row_len).enumerate().for_each(row_op);
    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(row_len).enumerate().for_each(row_op);

    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pixtune_core::{Channels, RgbTriplet};

    #[test]
    fn test_lanczos_weights() {
        assert_abs_diff_eq!(lanczos_weight(0.0), 1.0);
        // zero crossings at non-zero integers
        assert_abs_diff_eq!(lanczos_weight(1.0), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(lanczos_weight(-2.0), 0.0, epsilon = 1e-6);
        assert_eq!(lanczos_weight(3.0), 0.0);
        assert!(lanczos_weight(0.5) > 0.5);
        assert!(lanczos_weight(1.5) < 0.0);
    }

    #[test]
    fn test_taps_normalized() {
        for (src, dst) in [(4, 8), (10, 3), (7, 7)] {
            for tap in contributions(src, dst) {
                let sum: f32 = tap.weights.iter().sum();
                assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_dimensions_floor() {
        let img = PixelBuffer::filled(7, 3, RgbTriplet::new(1, 2, 3));
        for scale in [0.5f32, 1.0, 1.3, 2.0, 3.7] {
            let out = resize(&img, scale).unwrap();
            assert_eq!(out.width(), (7.0 * scale as f64).floor() as u32);
            assert_eq!(out.height(), (3.0 * scale as f64).floor() as u32);
            assert_eq!(out.channels(), Channels::Rgb);
            assert_eq!(out.data().len(), out.pixel_count() * 3);
        }
    }

    #[test]
    fn test_constant_stays_constant() {
        let img = PixelBuffer::filled(5, 4, RgbTriplet::new(0, 128, 255));
        let out = resize(&img, 2.0).unwrap();
        assert_eq!(out.dimensions(), (10, 8));
        for px in out.pixels() {
            assert_eq!(px, &[0, 128, 255]);
        }
    }

    #[test]
    fn test_same_size_is_identity() {
        // At scale 1 every tap lands on an integer offset where the kernel
        // is 1 at the center and 0 elsewhere.
        let img = PixelBuffer::from_fn(6, 5, |x, y| RgbTriplet::new((x * 40) as u8, (y * 50) as u8, 7));
        let out = resize(&img, 1.0).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_gray_upscale() {
        let img = PixelBuffer::from_raw(2, 1, Channels::Gray, vec![0, 255]).unwrap();
        let out = resize(&img, 4.0).unwrap();
        assert_eq!(out.dimensions(), (8, 4));
        assert_eq!(out.channels(), Channels::Gray);
        let row = out.row(0).unwrap();
        // Edges keep the clamped source values, the middle is a transition
        assert_eq!(row[0], 0);
        assert_eq!(row[7], 255);
        assert!(row[3] < row[4]);
    }

    #[test]
    fn test_edges_clamp() {
        // A mirrored edge would pull the bright center into the border
        // columns (about 63); repeating the edge pixel keeps them dark.
        let img = PixelBuffer::from_raw(3, 1, Channels::Gray, vec![0, 255, 0]).unwrap();
        let out = resize(&img, 3.0).unwrap();
        assert_eq!(out.dimensions(), (9, 3));
        let expected = [0u8, 0, 98, 208, 255, 208, 98, 0, 0];
        for y in 0..3 {
            let row = out.row(y).unwrap();
            for (x, (&got, &want)) in row.iter().zip(&expected).enumerate() {
                assert!(got.abs_diff(want) <= 1, "({x}, {y}): {got} vs {want}");
            }
            assert_eq!(row[0], 0);
            assert_eq!(row[8], 0);
        }
    }

    #[test]
    fn test_huge_scale_rejected() {
        let img = PixelBuffer::filled(4, 4, RgbTriplet::new(1, 2, 3));
        let err = resize(&img, 1e9).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(resize_to(&img, u32::MAX, u32::MAX).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_deterministic() {
        let img = PixelBuffer::from_fn(13, 9, |x, y| {
            RgbTriplet::new((x * 19) as u8, (y * 23) as u8, ((x ^ y) * 11) as u8)
        });
        let a = resize(&img, 2.3).unwrap();
        let b = resize(&img, 2.3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_scale() {
        let img = PixelBuffer::filled_gray(2, 2, 0);
        for scale in [0.0f32, -1.0, f32::NAN, f32::INFINITY] {
            assert!(resize(&img, scale).unwrap_err().is_invalid_parameter());
        }
    }

    #[test]
    fn test_empty_input_and_output() {
        let empty = PixelBuffer::new(0, 2, Channels::Rgb);
        assert!(resize(&empty, 2.0).unwrap_err().is_empty_buffer());

        let tiny = PixelBuffer::filled_gray(1, 1, 3);
        let out = resize(&tiny, 0.5).unwrap();
        assert!(out.is_empty());
    }
}
