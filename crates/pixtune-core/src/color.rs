//! Color triplets and RGB/HSV conversion.
//!
//! A [`ColorTriplet`] is three 8-bit values whose meaning is fixed at compile
//! time by a zero-sized [`ColorModel`] marker. An [`RgbTriplet`] cannot be
//! passed where an [`HsvTriplet`] is expected; the only way across is
//! [`rgb_to_hsv`] / [`hsv_to_rgb`].
//!
//! # HSV Scaling
//!
//! The cylindrical HSV model is used with every component in 8-bit range:
//!
//! | Component | Range | Meaning |
//! |-----------|-------|---------|
//! | H | `[0, 256)` | hue angle, 256 units per full turn (0 = red) |
//! | S | `[0, 255]` | chroma relative to value |
//! | V | `[0, 255]` | max(R, G, B) |
//!
//! The float variants ([`rgb_to_hsv_f32`], [`hsv_to_rgb_f32`]) use the same
//! scaling without rounding and round-trip exactly up to float error. The
//! 8-bit variants quantize hue to 256 steps, so a round trip of a strongly
//! saturated color may move a channel by a few units.

use std::fmt;
use std::marker::PhantomData;

/// Number of hue units in one full turn of the color wheel.
pub const HUE_RANGE: f32 = 256.0;

/// Marker trait for the interpretation of a [`ColorTriplet`].
pub trait ColorModel: Copy + Clone + Default + Send + Sync + fmt::Debug + 'static {
    /// Human-readable model name.
    const NAME: &'static str;
}

/// Red, green, blue.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb;

/// Hue, saturation, value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Hsv;

impl ColorModel for Rgb {
    const NAME: &'static str = "RGB";
}

impl ColorModel for Hsv {
    const NAME: &'static str = "HSV";
}

/// Three 8-bit components interpreted according to `M`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct ColorTriplet<M: ColorModel> {
    values: [u8; 3],
    _model: PhantomData<M>,
}

/// A triplet in RGB order.
pub type RgbTriplet = ColorTriplet<Rgb>;

/// A triplet in HSV order.
pub type HsvTriplet = ColorTriplet<Hsv>;

impl<M: ColorModel> ColorTriplet<M> {
    /// Creates a triplet from its three components.
    #[inline]
    pub const fn new(a: u8, b: u8, c: u8) -> Self {
        Self {
            values: [a, b, c],
            _model: PhantomData,
        }
    }

    /// Creates a triplet from an array.
    #[inline]
    pub const fn from_array(values: [u8; 3]) -> Self {
        Self {
            values,
            _model: PhantomData,
        }
    }

    /// Returns the components as an array.
    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        self.values
    }
}

impl RgbTriplet {
    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        self.values[0]
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        self.values[1]
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        self.values[2]
    }

    /// Formats the color as `#rrggbb`.
    ///
    /// ```
    /// use pixtune_core::RgbTriplet;
    ///
    /// assert_eq!(RgbTriplet::new(255, 128, 0).to_hex(), "#ff8000");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }
}

impl HsvTriplet {
    /// Hue component, 256 units per turn.
    #[inline]
    pub const fn h(self) -> u8 {
        self.values[0]
    }

    /// Saturation component.
    #[inline]
    pub const fn s(self) -> u8 {
        self.values[1]
    }

    /// Value component.
    #[inline]
    pub const fn v(self) -> u8 {
        self.values[2]
    }
}

impl<M: ColorModel> fmt::Debug for ColorTriplet<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.values;
        write!(f, "{}({}, {}, {})", M::NAME, a, b, c)
    }
}

impl<M: ColorModel> From<[u8; 3]> for ColorTriplet<M> {
    fn from(values: [u8; 3]) -> Self {
        Self::from_array(values)
    }
}

/// Converts RGB samples in `[0, 255]` to continuous HSV.
///
/// Returns `[h, s, v]` with `h` in `[0, 256)` and `s`, `v` in `[0, 255]`.
/// Achromatic inputs (R = G = B) have hue and saturation 0.
#[inline]
pub fn rgb_to_hsv_f32(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta <= 0.0 || max <= 0.0 {
        return [0.0, 0.0, max];
    }

    let sat = delta / max * 255.0;
    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let mut hue = sector / 6.0 * HUE_RANGE;
    if hue >= HUE_RANGE {
        hue -= HUE_RANGE;
    }
    [hue, sat, max]
}

/// Converts continuous HSV (as produced by [`rgb_to_hsv_f32`]) back to RGB in
/// `[0, 255]`.
///
/// Hue wraps modulo 256; saturation and value are used as given, so callers
/// clamp them beforehand if they may leave `[0, 255]`.
#[inline]
pub fn hsv_to_rgb_f32(hsv: [f32; 3]) -> [f32; 3] {
    let [h, s, v] = hsv;
    let sat = s / 255.0;
    if sat <= 0.0 {
        return [v, v, v];
    }

    let h6 = h.rem_euclid(HUE_RANGE) / HUE_RANGE * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - sat);
    let q = v * (1.0 - sat * f);
    let t = v * (1.0 - sat * (1.0 - f));

    match sector as u32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

#[inline]
fn quantize(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Converts an RGB triplet to HSV with hue quantized to 256 steps.
///
/// Total over all 8-bit inputs.
///
/// ```
/// use pixtune_core::{rgb_to_hsv, RgbTriplet, HsvTriplet};
///
/// assert_eq!(rgb_to_hsv(RgbTriplet::new(255, 0, 0)), HsvTriplet::new(0, 255, 255));
/// assert_eq!(rgb_to_hsv(RgbTriplet::new(0, 0, 255)).h(), 171);
/// ```
pub fn rgb_to_hsv(rgb: RgbTriplet) -> HsvTriplet {
    let [r, g, b] = rgb.to_array();
    let [h, s, v] = rgb_to_hsv_f32([r as f32, g as f32, b as f32]);
    // 255.5 rounds to 256, which is the same angle as 0
    let hue = (h.round() as u32 % 256) as u8;
    HsvTriplet::new(hue, quantize(s), quantize(v))
}

/// Converts an HSV triplet back to RGB.
///
/// Total over all 8-bit inputs.
pub fn hsv_to_rgb(hsv: HsvTriplet) -> RgbTriplet {
    let [h, s, v] = hsv.to_array();
    let [r, g, b] = hsv_to_rgb_f32([h as f32, s as f32, v as f32]);
    RgbTriplet::new(quantize(r), quantize(g), quantize(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_primaries() {
        assert_eq!(rgb_to_hsv(RgbTriplet::new(255, 0, 0)), HsvTriplet::new(0, 255, 255));
        // green is one third of a turn: 256 / 3 = 85.33
        assert_eq!(rgb_to_hsv(RgbTriplet::new(0, 255, 0)), HsvTriplet::new(85, 255, 255));
        assert_eq!(rgb_to_hsv(RgbTriplet::new(0, 0, 255)), HsvTriplet::new(171, 255, 255));
        assert_eq!(hsv_to_rgb(HsvTriplet::new(0, 255, 255)), RgbTriplet::new(255, 0, 0));
    }

    #[test]
    fn test_achromatic() {
        for g in [0u8, 1, 64, 128, 200, 255] {
            let hsv = rgb_to_hsv(RgbTriplet::new(g, g, g));
            assert_eq!(hsv, HsvTriplet::new(0, 0, g));
            assert_eq!(hsv_to_rgb(hsv), RgbTriplet::new(g, g, g));
        }
    }

    #[test]
    fn test_float_round_trip() {
        for r in (0..=255).step_by(17) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(51) {
                    let rgb = [r as f32, g as f32, b as f32];
                    let back = hsv_to_rgb_f32(rgb_to_hsv_f32(rgb));
                    for c in 0..3 {
                        assert_abs_diff_eq!(back[c], rgb[c], epsilon = 1e-3);
                    }
                }
            }
        }
    }

    #[test]
    fn test_hue_in_range() {
        // Reds with a blue cast land just below a full turn
        let [h, _, _] = rgb_to_hsv_f32([255.0, 0.0, 1.0]);
        assert!(h < HUE_RANGE);
        assert!(h > 255.0);
        assert_eq!(rgb_to_hsv(RgbTriplet::new(255, 0, 1)).h(), 0);
    }

    #[test]
    fn test_8bit_round_trip_error_is_bounded() {
        // Hue quantization costs at most half a hue unit, about 3 RGB units
        for r in (0..=255).step_by(5) {
            for g in (0..=255).step_by(5) {
                for b in (0..=255).step_by(85) {
                    let rgb = RgbTriplet::new(r as u8, g as u8, b as u8);
                    let back = hsv_to_rgb(rgb_to_hsv(rgb));
                    for (x, y) in rgb.to_array().iter().zip(back.to_array()) {
                        assert!((*x as i32 - y as i32).abs() <= 4, "{rgb:?} -> {back:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_value_is_max_component() {
        let hsv = rgb_to_hsv(RgbTriplet::new(12, 200, 90));
        assert_eq!(hsv.v(), 200);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", RgbTriplet::new(1, 2, 3)), "RGB(1, 2, 3)");
        assert_eq!(format!("{:?}", HsvTriplet::new(4, 5, 6)), "HSV(4, 5, 6)");
    }
}
