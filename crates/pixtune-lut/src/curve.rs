//! Piecewise-linear tone curves.
//!
//! A curve is defined by sparse `(input, output)` control points. Between two
//! neighbouring points the output is linearly interpolated; outside the first
//! and last point it is held at that point's output. The curve is sampled into
//! a [`Lut8`] once and then applied by table lookup.
//!
//! Outputs are not required to be monotonic. Inverted or wavy curves are the
//! caller's choice.

use crate::{Lut8, LutError, LutResult, LUT_SIZE};

/// A validated set of tone-curve control points.
///
/// Invariant: at least one point, inputs strictly increasing.
///
/// # Example
///
/// ```rust
/// use pixtune_lut::ToneCurve;
///
/// // Points may be given in any order
/// let curve = ToneCurve::new([(255, 255), (0, 0), (128, 200)]).unwrap();
/// assert_eq!(curve.points(), &[(0, 0), (128, 200), (255, 255)]);
///
/// // Repeated inputs are rejected
/// assert!(ToneCurve::new([(10, 0), (10, 5)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneCurve {
    points: Vec<(u8, u8)>,
}

impl ToneCurve {
    /// Builds a curve from control points, sorting them by input.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::InvalidControlPoints`] if no points are given or
    /// two points share an input value.
    pub fn new<I>(points: I) -> LutResult<Self>
    where
        I: IntoIterator<Item = (u8, u8)>,
    {
        let mut points: Vec<(u8, u8)> = points.into_iter().collect();
        if points.is_empty() {
            return Err(LutError::InvalidControlPoints(
                "at least one control point is required".into(),
            ));
        }
        points.sort_by_key(|&(input, _)| input);
        if let Some(pair) = points.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(LutError::InvalidControlPoints(format!(
                "duplicate input value {}",
                pair[0].0
            )));
        }
        Ok(Self { points })
    }

    /// The straight line from `(0, 0)` to `(255, 255)`.
    pub fn identity() -> Self {
        Self {
            points: vec![(0, 0), (255, 255)],
        }
    }

    /// Control points sorted by input.
    #[inline]
    pub fn points(&self) -> &[(u8, u8)] {
        &self.points
    }

    /// Evaluates the curve at one input value.
    pub fn evaluate(&self, x: u8) -> u8 {
        // First point whose input is >= x
        let idx = self.points.partition_point(|&(input, _)| input < x);
        if idx == 0 {
            return self.points[0].1;
        }
        if idx == self.points.len() {
            return self.points[idx - 1].1;
        }

        let (x1, y1) = self.points[idx];
        if x1 == x {
            return y1;
        }
        let (x0, y0) = self.points[idx - 1];
        let t = (x - x0) as f32 / (x1 - x0) as f32;
        let y = y0 as f32 + (y1 as f32 - y0 as f32) * t;
        y.round().clamp(0.0, 255.0) as u8
    }

    /// Samples the curve at all 256 inputs.
    ///
    /// Every control point is reproduced exactly: `lut[x_i] == y_i`.
    pub fn to_lut(&self) -> Lut8 {
        let mut r = [0u8; LUT_SIZE];
        for (x, out) in r.iter_mut().enumerate() {
            *out = self.evaluate(x as u8);
        }
        Lut8 { r, g: None, b: None }
    }
}

impl Default for ToneCurve {
    fn default() -> Self {
        Self::identity()
    }
}
