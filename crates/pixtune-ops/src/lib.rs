//! # pixtune-ops
//!
//! Image adjustment operators and their composition.
//!
//! Every operator takes a [`PixelBuffer`](pixtune_core::PixelBuffer) by
//! reference and returns a new one; inputs are never modified.
//!
//! # Modules
//!
//! - [`resize`] - Lanczos-3 upsampling and the external [`Upscaler`] seam
//! - [`contrast`] - Linear contrast around mid-gray
//! - [`invert`] - Photographic negative
//! - [`hsv`] - Hue/saturation/value scaling
//! - [`curve`] - Piecewise-linear tone curves
//! - [`point`] - Per-sample operators applied through lookup tables
//! - [`pipeline`] - Ordered composition with step-indexed errors
//!
//! # Example
//!
//! ```rust
//! use pixtune_core::{PixelBuffer, RgbTriplet};
//! use pixtune_ops::{apply_pipeline, HsvAdjust, Step};
//!
//! let img = PixelBuffer::filled(2, 2, RgbTriplet::new(200, 100, 50));
//! let steps = [
//!     Step::Contrast { factor: 1.1 },
//!     Step::Hsv(HsvAdjust::new(1.0, 0.0, 1.0)),
//! ];
//! let out = apply_pipeline(&img, &steps).unwrap();
//! let px = out.sample(0, 0).unwrap();
//! assert_eq!(px.r(), px.g());
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - process rows with rayon
//! - `serde` - (de)serialize [`Step`] and its parameters for recipe files

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod contrast;
pub mod curve;
pub mod hsv;
pub mod invert;
pub mod pipeline;
pub mod point;
pub mod resize;

pub use contrast::Contrast;
pub use curve::CurveSet;
pub use error::{OpsError, OpsResult, PipelineError};
pub use hsv::HsvAdjust;
pub use invert::Invert;
pub use pipeline::{apply_pipeline, Pipeline, Preview, Step};
pub use point::PointOp;
pub use resize::{ResizeStrategy, Upscaler};
