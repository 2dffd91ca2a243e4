//! # pixtune-lut
//!
//! Tone curves and 8-bit lookup tables.
//!
//! # Types
//!
//! - [`ToneCurve`] - Sparse control points defining a piecewise-linear
//!   brightness remapping
//! - [`Lut8`] - 256-entry lookup table, shared across channels or per channel
//!
//! # Usage
//!
//! ```rust
//! use pixtune_lut::ToneCurve;
//!
//! let curve = ToneCurve::new([(0, 0), (128, 200), (255, 255)]).unwrap();
//! let lut = curve.to_lut();
//!
//! assert_eq!(lut.apply(128), 200);
//! assert_eq!(lut.apply(64), 100);
//! ```
//!
//! # Used By
//!
//! - `pixtune-ops` - Tone curve, contrast and invert operators

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod curve;
mod error;
mod lut8;

pub use curve::ToneCurve;
pub use error::{LutError, LutResult};
pub use lut8::{Lut8, LUT_SIZE};
