//! Ordered composition of operators.
//!
//! A pipeline is a list of [`Step`]s applied left to right. Each step
//! consumes the previous step's output and produces a new buffer; the input
//! buffer is never modified, so callers can keep it for before/after
//! comparison (see [`Pipeline::preview`]).
//!
//! The first failing step aborts the run. The error carries the step's
//! zero-based index and operator name, and nothing computed before the
//! failure is returned.
//!
//! # Example
//!
//! ```rust
//! use pixtune_core::{PixelBuffer, RgbTriplet};
//! use pixtune_ops::{CurveSet, Pipeline};
//!
//! let pipeline = Pipeline::new()
//!     .resize(2.0)
//!     .contrast(1.2)
//!     .tone_curve(CurveSet::shared([(0, 0), (128, 200), (255, 255)]));
//!
//! let img = PixelBuffer::filled(4, 4, RgbTriplet::new(90, 120, 150));
//! let out = pipeline.run(&img).unwrap();
//! assert_eq!(out.dimensions(), (8, 8));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::contrast::contrast;
use crate::curve::{tone_curve, CurveSet};
use crate::hsv::{hsv_adjust, HsvAdjust};
use crate::invert::invert;
use crate::resize::{resize, ResizeStrategy, Upscaler};
use crate::{OpsError, OpsResult, PipelineError};
use pixtune_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace};

#[cfg(feature = "serde")]
fn default_scale() -> f32 {
    crate::resize::DEFAULT_SCALE
}

/// A single operator invocation with its parameters.
///
/// In a YAML recipe each step is tagged with `op`:
///
/// ```yaml
/// - op: resize
///   scale: 2.0
/// - op: contrast
///   factor: 1.3
/// - op: invert
/// - op: hsv
///   hue: 1.0
///   saturation: 1.4
/// - op: tone_curve
///   curves: [[0, 0], [128, 200], [255, 255]]
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum Step {
    /// Upsample by `scale`.
    Resize {
        /// Scale factor applied to both axes.
        #[cfg_attr(feature = "serde", serde(default = "default_scale"))]
        scale: f32,
        /// Lanczos filter or the injected upscaler.
        #[cfg_attr(feature = "serde", serde(default))]
        strategy: ResizeStrategy,
    },
    /// Linear contrast around mid-gray.
    Contrast {
        /// Scale factor (1.0 = no change).
        factor: f32,
    },
    /// `255 - sample` on every channel.
    Invert,
    /// Hue/saturation/value scaling.
    Hsv(HsvAdjust),
    /// Piecewise-linear tone curves.
    ToneCurve {
        /// Shared or per-channel control points.
        curves: CurveSet,
    },
}

impl Step {
    /// Operator name, as used in recipes and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Step::Resize { .. } => "resize",
            Step::Contrast { .. } => "contrast",
            Step::Invert => "invert",
            Step::Hsv(_) => "hsv",
            Step::ToneCurve { .. } => "tone_curve",
        }
    }

    /// Lanczos resize by `scale`.
    pub fn resize(scale: f32) -> Self {
        Step::Resize {
            scale,
            strategy: ResizeStrategy::Lanczos,
        }
    }

    /// Applies this step with the Lanczos resize only.
    ///
    /// A [`ResizeStrategy::Learned`] step fails here; run it through a
    /// [`Pipeline`] with an upscaler instead.
    pub fn apply(&self, buffer: &PixelBuffer) -> OpsResult<PixelBuffer> {
        self.apply_with(buffer, None)
    }

    fn apply_with(
        &self,
        buffer: &PixelBuffer,
        upscaler: Option<&dyn Upscaler>,
    ) -> OpsResult<PixelBuffer> {
        match self {
            Step::Resize {
                scale,
                strategy: ResizeStrategy::Lanczos,
            } => resize(buffer, *scale),
            Step::Resize {
                strategy: ResizeStrategy::Learned,
                ..
            } => learned_upscale(buffer, upscaler),
            Step::Contrast { factor } => contrast(buffer, *factor),
            Step::Invert => invert(buffer),
            Step::Hsv(params) => hsv_adjust(buffer, params),
            Step::ToneCurve { curves } => tone_curve(buffer, curves),
        }
    }
}

fn learned_upscale(buffer: &PixelBuffer, upscaler: Option<&dyn Upscaler>) -> OpsResult<PixelBuffer> {
    let Some(upscaler) = upscaler else {
        return Err(OpsError::invalid(
            "learned resize requested but no upscaler is configured",
        ));
    };
    buffer.ensure_not_empty()?;
    debug!(upscaler = upscaler.name(), "learned upscale");
    let out = upscaler.upscale(buffer)?;
    if out.channels() != buffer.channels() {
        return Err(OpsError::invalid(format!(
            "upscaler '{}' returned {} channels, expected {}",
            upscaler.name(),
            out.channel_count(),
            buffer.channel_count()
        )));
    }
    Ok(out)
}

/// The input of a pipeline run next to its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// The unmodified input.
    pub before: PixelBuffer,
    /// The pipeline result.
    pub after: PixelBuffer,
}

/// An ordered list of steps plus an optional external upscaler.
///
/// Immutable once built: [`Pipeline::run`] takes `&self` and may be called
/// any number of times. Nothing is cached between runs.
#[derive(Clone, Default)]
pub struct Pipeline {
    steps: Vec<Step>,
    upscaler: Option<Arc<dyn Upscaler>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("steps", &self.steps)
            .field("upscaler", &self.upscaler.as_ref().map(|u| u.name()))
            .finish()
    }
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline from a list of steps.
    pub fn from_steps(steps: impl Into<Vec<Step>>) -> Self {
        Self {
            steps: steps.into(),
            upscaler: None,
        }
    }

    /// Sets the operator used by [`ResizeStrategy::Learned`] steps.
    ///
    /// The caller owns the upscaler's lifecycle (loading weights etc.); the
    /// pipeline only invokes it.
    pub fn with_upscaler(mut self, upscaler: Arc<dyn Upscaler>) -> Self {
        self.upscaler = Some(upscaler);
        self
    }

    /// Adds a step to the pipeline.
    pub fn push(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Adds a Lanczos resize step.
    pub fn resize(self, scale: f32) -> Self {
        self.push(Step::resize(scale))
    }

    /// Adds a resize step that runs the configured upscaler.
    pub fn learned_resize(self, scale: f32) -> Self {
        self.push(Step::Resize {
            scale,
            strategy: ResizeStrategy::Learned,
        })
    }

    /// Adds a contrast step.
    pub fn contrast(self, factor: f32) -> Self {
        self.push(Step::Contrast { factor })
    }

    /// Adds an invert step.
    pub fn invert(self) -> Self {
        self.push(Step::Invert)
    }

    /// Adds an HSV adjustment step.
    pub fn hsv(self, params: HsvAdjust) -> Self {
        self.push(Step::Hsv(params))
    }

    /// Adds a tone-curve step.
    pub fn tone_curve(self, curves: CurveSet) -> Self {
        self.push(Step::ToneCurve { curves })
    }

    /// Returns the number of steps in the pipeline.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the steps in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Applies every step in order and returns the final buffer.
    ///
    /// An empty pipeline returns a copy of `input`.
    ///
    /// # Errors
    ///
    /// Returns a [`PipelineError`] naming the first step that failed.
    pub fn run(&self, input: &PixelBuffer) -> Result<PixelBuffer, PipelineError> {
        let (width, height) = input.dimensions();
        debug!(steps = self.steps.len(), width, height, "pipeline::run");

        let upscaler = self.upscaler.as_deref();
        let mut current = input.clone();
        for (index, step) in self.steps.iter().enumerate() {
            trace!(index, op = step.name(), "pipeline step");
            current = step
                .apply_with(&current, upscaler)
                .map_err(|source| {
                    debug!(index, op = step.name(), error = %source, "pipeline step failed");
                    PipelineError {
                        index,
                        op: step.name(),
                        source,
                    }
                })?;
        }
        Ok(current)
    }

    /// Runs the pipeline and returns the input alongside the result.
    pub fn preview(&self, input: &PixelBuffer) -> Result<Preview, PipelineError> {
        let after = self.run(input)?;
        Ok(Preview {
            before: input.clone(),
            after,
        })
    }
}

/// Applies `steps` to `buffer` in order.
///
/// Shorthand for `Pipeline::from_steps(steps).run(buffer)`; learned resize
/// steps fail because no upscaler is configured.
pub fn apply_pipeline(buffer: &PixelBuffer, steps: &[Step]) -> Result<PixelBuffer, PipelineError> {
    Pipeline::from_steps(steps).run(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixtune_core::{Channels, RgbTriplet};
    use std::error::Error as _;

    fn gradient() -> PixelBuffer {
        PixelBuffer::from_fn(8, 6, |x, y| RgbTriplet::new((x * 30) as u8, (y * 40) as u8, 128))
    }

    #[test]
    fn test_empty_pipeline_copies_input() {
        let img = gradient();
        let out = apply_pipeline(&img, &[]).unwrap();
        assert_eq!(out, img);

        let empty = PixelBuffer::new(0, 0, Channels::Rgb);
        assert!(apply_pipeline(&empty, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_steps_run_in_order() {
        let img = gradient();
        let piped = Pipeline::new().contrast(2.0).invert().run(&img).unwrap();
        let manual = invert(&contrast(&img, 2.0).unwrap()).unwrap();
        assert_eq!(piped, manual);

        // Different order, different result
        let swapped = Pipeline::new().invert().contrast(2.0).run(&img).unwrap();
        assert_ne!(piped, swapped);
    }

    #[test]
    fn test_failure_reports_step_index() {
        let img = gradient();
        let steps = [
            Step::Invert,
            Step::Contrast { factor: 1.5 },
            Step::ToneCurve {
                curves: CurveSet::shared([(4, 0), (4, 9)]),
            },
            Step::Invert,
        ];
        let err = apply_pipeline(&img, &steps).unwrap_err();
        assert_eq!(err.step_index(), 2);
        assert_eq!(err.op, "tone_curve");
        assert!(err.cause().is_invalid_control_points());
        assert!(err.source().is_some());
        assert!(err.to_string().contains("step 2"));
    }

    #[test]
    fn test_empty_after_resize_fails_downstream() {
        let img = PixelBuffer::filled_gray(1, 1, 9);
        let err = Pipeline::new().resize(0.5).invert().run(&img).unwrap_err();
        assert_eq!(err.step_index(), 1);
        assert!(err.cause().is_empty_buffer());
    }

    #[test]
    fn test_preview_keeps_original() {
        let img = gradient();
        let preview = Pipeline::new().invert().preview(&img).unwrap();
        assert_eq!(preview.before, img);
        assert_eq!(preview.after, invert(&img).unwrap());
    }

    #[test]
    fn test_run_is_deterministic() {
        let img = gradient();
        let pipeline = Pipeline::new()
            .resize(1.7)
            .hsv(HsvAdjust::new(1.2, 0.8, 1.1))
            .contrast(0.9);
        assert_eq!(pipeline.run(&img).unwrap(), pipeline.run(&img).unwrap());
    }

    #[test]
    fn test_learned_resize() {
        let img = gradient();
        let missing = Pipeline::new().learned_resize(2.0).run(&img).unwrap_err();
        assert_eq!(missing.step_index(), 0);
        assert!(missing.cause().is_invalid_parameter());

        let upscaler: Arc<dyn Upscaler> = Arc::new(|b: &PixelBuffer| resize(b, 3.0));
        let out = Pipeline::new()
            .learned_resize(2.0)
            .with_upscaler(upscaler)
            .run(&img)
            .unwrap();
        assert_eq!(out.dimensions(), (24, 18));
    }

    #[test]
    fn test_learned_resize_channel_mismatch() {
        let img = gradient();
        let to_gray: Arc<dyn Upscaler> =
            Arc::new(|b: &PixelBuffer| -> OpsResult<PixelBuffer> {
                Ok(PixelBuffer::filled_gray(b.width(), b.height(), 0))
            });
        let err = Pipeline::new()
            .invert()
            .learned_resize(2.0)
            .with_upscaler(to_gray)
            .run(&img)
            .unwrap_err();
        assert_eq!(err.step_index(), 1);
        assert!(err.cause().is_invalid_parameter());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_recipe_yaml() {
        let yaml = r#"
- op: resize
- op: contrast
  factor: 1.5
- op: invert
- op: hsv
  saturation: 0.5
- op: tone_curve
  curves:
    red: [[0, 0], [255, 255]]
    green: [[0, 10]]
    blue: [[255, 0], [0, 255]]
"#;
        let steps: Vec<Step> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0], Step::resize(crate::resize::DEFAULT_SCALE));
        assert_eq!(steps[1], Step::Contrast { factor: 1.5 });
        assert_eq!(steps[3], Step::Hsv(HsvAdjust::new(1.0, 0.5, 1.0)));
        assert_eq!(
            steps[4],
            Step::ToneCurve {
                curves: CurveSet::per_channel([(0, 0), (255, 255)], [(0, 10)], [(255, 0), (0, 255)]),
            }
        );

        let out = apply_pipeline(&gradient(), &steps).unwrap();
        assert_eq!(out.dimensions(), (16, 12));
    }
}
