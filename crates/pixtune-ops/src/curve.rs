//! Tone-curve operator.
//!
//! Remaps brightness through piecewise-linear curves built from sparse
//! control points. One curve may be shared by every channel, or the red,
//! green and blue channels may each get their own.

use crate::point::apply_lut;
use crate::{OpsError, OpsResult};
use pixtune_core::{Channels, PixelBuffer};
use pixtune_lut::{Lut8, ToneCurve};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Control points for a tone-curve adjustment.
///
/// Points are kept as given; they are validated when the curve is applied.
///
/// In a recipe file a list of points is a shared curve:
///
/// ```yaml
/// [[0, 0], [128, 200], [255, 255]]
/// ```
///
/// and a map with `red`, `green` and `blue` lists sets each channel:
///
/// ```yaml
/// red: [[0, 0], [255, 230]]
/// green: [[0, 0], [255, 255]]
/// blue: [[0, 30], [255, 255]]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CurveSet {
    /// One curve applied to every channel.
    Shared(Vec<(u8, u8)>),
    /// Independent curves for red, green and blue.
    PerChannel {
        /// Red channel points.
        red: Vec<(u8, u8)>,
        /// Green channel points.
        green: Vec<(u8, u8)>,
        /// Blue channel points.
        blue: Vec<(u8, u8)>,
    },
}

impl Default for CurveSet {
    fn default() -> Self {
        CurveSet::Shared(ToneCurve::identity().points().to_vec())
    }
}

impl CurveSet {
    /// Creates a shared curve from control points.
    pub fn shared(points: impl Into<Vec<(u8, u8)>>) -> Self {
        CurveSet::Shared(points.into())
    }

    /// Creates per-channel curves from red, green and blue control points.
    pub fn per_channel(
        red: impl Into<Vec<(u8, u8)>>,
        green: impl Into<Vec<(u8, u8)>>,
        blue: impl Into<Vec<(u8, u8)>>,
    ) -> Self {
        CurveSet::PerChannel {
            red: red.into(),
            green: green.into(),
            blue: blue.into(),
        }
    }

    /// Returns `true` for separate red/green/blue curves.
    pub fn is_per_channel(&self) -> bool {
        matches!(self, CurveSet::PerChannel { .. })
    }

    /// Validates the control points and samples them into a lookup table.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::Lut`] wrapping
    /// [`pixtune_lut::LutError::InvalidControlPoints`] if any curve has no
    /// points or repeats an input value.
    pub fn build(&self) -> OpsResult<Lut8> {
        Ok(match self {
            CurveSet::Shared(points) => ToneCurve::new(points.iter().copied())?.to_lut(),
            CurveSet::PerChannel { red, green, blue } => {
                let table = |points: &[(u8, u8)]| -> OpsResult<[u8; 256]> {
                    Ok(ToneCurve::new(points.iter().copied())?.to_lut().r)
                };
                Lut8::from_rgb(table(red.as_slice())?, table(green.as_slice())?, table(blue.as_slice())?)
            }
        })
    }
}

/// Applies tone curves to every sample of `buffer`.
///
/// A shared curve applies to every channel of RGB and grayscale buffers.
/// Per-channel curves require an RGB buffer.
///
/// # Errors
///
/// - invalid control points if a curve is empty or repeats an input
/// - invalid parameter for per-channel curves on a grayscale buffer
/// - empty buffer if `buffer` has zero area
///
/// # Example
///
/// ```rust
/// use pixtune_core::{PixelBuffer, RgbTriplet};
/// use pixtune_ops::curve::{tone_curve, CurveSet};
///
/// let img = PixelBuffer::filled(1, 1, RgbTriplet::new(64, 128, 255));
/// let curves = CurveSet::shared([(0, 0), (128, 200), (255, 255)]);
/// let out = tone_curve(&img, &curves).unwrap();
/// assert_eq!(out.sample(0, 0).unwrap(), RgbTriplet::new(100, 200, 255));
/// ```
pub fn tone_curve(buffer: &PixelBuffer, curves: &CurveSet) -> OpsResult<PixelBuffer> {
    let lut = curves.build()?;
    if curves.is_per_channel() && buffer.channels() == Channels::Gray {
        return Err(OpsError::invalid(
            "per-channel tone curves need an RGB buffer, got grayscale",
        ));
    }
    let (width, height) = buffer.dimensions();
    trace!(width, height, per_channel = curves.is_per_channel(), "tone_curve");
    apply_lut(buffer, &lut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixtune_core::RgbTriplet;

    #[test]
    fn test_shared_curve() {
        let img = PixelBuffer::from_raw(3, 1, Channels::Gray, vec![0, 64, 128]).unwrap();
        let curves = CurveSet::shared([(0, 0), (128, 200), (255, 255)]);
        let out = tone_curve(&img, &curves).unwrap();
        assert_eq!(out.data(), &[0, 100, 200]);
    }

    #[test]
    fn test_per_channel_curves() {
        let img = PixelBuffer::filled(2, 2, RgbTriplet::new(100, 100, 100));
        let curves = CurveSet::per_channel(
            [(0, 255), (255, 0)],
            [(0, 0), (255, 255)],
            [(0, 50)],
        );
        let out = tone_curve(&img, &curves).unwrap();
        for px in out.pixels() {
            assert_eq!(px, &[155, 100, 50]);
        }
    }

    #[test]
    fn test_identity_default() {
        let img = PixelBuffer::from_fn(8, 8, |x, y| RgbTriplet::new((x * 30) as u8, (y * 30) as u8, 9));
        assert_eq!(tone_curve(&img, &CurveSet::default()).unwrap(), img);
    }

    #[test]
    fn test_invalid_points() {
        let img = PixelBuffer::filled_gray(1, 1, 0);
        let err = tone_curve(&img, &CurveSet::shared(Vec::<(u8, u8)>::new())).unwrap_err();
        assert!(err.is_invalid_control_points());

        let rgb = PixelBuffer::filled(1, 1, RgbTriplet::new(0, 0, 0));
        let curves = CurveSet::per_channel([(0, 0)], [(5, 1), (5, 2)], [(0, 0)]);
        assert!(tone_curve(&rgb, &curves).unwrap_err().is_invalid_control_points());
    }

    #[test]
    fn test_per_channel_on_gray() {
        let img = PixelBuffer::filled_gray(2, 2, 10);
        let curves = CurveSet::per_channel([(0, 0)], [(0, 0)], [(0, 0)]);
        assert!(tone_curve(&img, &curves).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_empty_buffer() {
        let img = PixelBuffer::new(0, 0, Channels::Rgb);
        assert!(tone_curve(&img, &CurveSet::default()).unwrap_err().is_empty_buffer());
    }
}
