//! Hue, saturation and value scaling.
//!
//! Every pixel is converted to HSV, scaled, and converted back:
//!
//! ```text
//! h' = (h * hue) mod 256
//! s' = clamp(s * saturation, 0, 255)
//! v' = clamp(v * value, 0, 255)
//! ```
//!
//! Hue is **multiplied**, not offset, and wraps around the color wheel. The
//! intermediate HSV values stay in `f32` so that unit factors reproduce the
//! input exactly; only the final RGB is rounded.
//!
//! Each output pixel depends only on its own input pixel, so the result does
//! not depend on processing order.

use crate::{OpsError, OpsResult};
use pixtune_core::{hsv_to_rgb_f32, rgb_to_hsv_f32, Channels, PixelBuffer, HUE_RANGE};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Parameters for the HSV adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HsvAdjust {
    /// Hue multiplier (1.0 = no change), wraps modulo 256.
    pub hue: f32,
    /// Saturation multiplier (0 = grayscale, 1 = unchanged).
    pub saturation: f32,
    /// Value multiplier (1 = unchanged).
    pub value: f32,
}

impl Default for HsvAdjust {
    fn default() -> Self {
        Self {
            hue: 1.0,
            saturation: 1.0,
            value: 1.0,
        }
    }
}

impl HsvAdjust {
    /// Create identity (no change).
    pub fn identity() -> Self {
        Self::default()
    }

    /// Creates an adjustment from the three factors.
    pub fn new(hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Check if this is identity (no-op).
    pub fn is_identity(&self) -> bool {
        self.hue == 1.0 && self.saturation == 1.0 && self.value == 1.0
    }

    /// Rejects NaN or infinite factors.
    pub fn validate(&self) -> OpsResult<()> {
        for (name, factor) in [
            ("hue", self.hue),
            ("saturation", self.saturation),
            ("value", self.value),
        ] {
            if !factor.is_finite() {
                return Err(OpsError::invalid(format!(
                    "{name} factor must be finite, got {factor}"
                )));
            }
        }
        Ok(())
    }

    /// Adjusts one RGB pixel.
    #[inline]
    pub fn apply_rgb(&self, rgb: [u8; 3]) -> [u8; 3] {
        let [h, s, v] = rgb_to_hsv_f32([rgb[0] as f32, rgb[1] as f32, rgb[2] as f32]);
        let h = (h * self.hue).rem_euclid(HUE_RANGE);
        let s = (s * self.saturation).clamp(0.0, 255.0);
        let v = (v * self.value).clamp(0.0, 255.0);
        let [r, g, b] = hsv_to_rgb_f32([h, s, v]);
        [quantize(r), quantize(g), quantize(b)]
    }
}

#[inline]
fn quantize(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Applies an HSV adjustment to every pixel.
///
/// Grayscale pixels have zero saturation, so only the value factor affects
/// them.
///
/// # Errors
///
/// - invalid parameter if any factor is NaN or infinite
/// - empty buffer if `buffer` has zero area
///
/// # Example
///
/// ```rust
/// use pixtune_core::{PixelBuffer, RgbTriplet};
/// use pixtune_ops::hsv::{hsv_adjust, HsvAdjust};
///
/// let img = PixelBuffer::filled(1, 1, RgbTriplet::new(200, 100, 50));
/// let gray = hsv_adjust(&img, &HsvAdjust::new(1.0, 0.0, 1.0)).unwrap();
/// assert_eq!(gray.sample(0, 0).unwrap(), RgbTriplet::new(200, 200, 200));
/// ```
pub fn hsv_adjust(buffer: &PixelBuffer, params: &HsvAdjust) -> OpsResult<PixelBuffer> {
    params.validate()?;
    buffer.ensure_not_empty()?;
    if params.is_identity() {
        return Ok(buffer.clone());
    }
    let (width, height) = buffer.dimensions();
    trace!(width, height, hue = params.hue, saturation = params.saturation, value = params.value, "hsv_adjust");

    let params = *params;
    Ok(match buffer.channels() {
        Channels::Rgb => buffer.map_pixels(move |src, dst| {
            dst.copy_from_slice(&params.apply_rgb([src[0], src[1], src[2]]));
        }),
        Channels::Gray => buffer.map_pixels(move |src, dst| {
            dst[0] = params.apply_rgb([src[0]; 3])[0];
        }),
    })
}
