//! # pixtune-core
//!
//! Core types for the pixtune image adjustment pipeline.
//!
//! This crate provides the foundational types used by every other pixtune crate:
//!
//! - [`PixelBuffer`] - Immutable, row-major 8-bit image buffer (gray or RGB)
//! - [`Channels`] - Channel layout of a buffer
//! - [`ColorTriplet`] - Three 8-bit values tagged with their color model
//!   ([`Rgb`] or [`Hsv`])
//! - [`rgb_to_hsv`] / [`hsv_to_rgb`] - Cylindrical color model conversion with
//!   hue scaled to `[0, 255]`
//!
//! ## Design Philosophy
//!
//! Buffers are never mutated after construction. Every operator reads one
//! buffer and produces a new one, so the original stays available for
//! before/after comparison:
//!
//! ```
//! use pixtune_core::{PixelBuffer, RgbTriplet};
//!
//! let before = PixelBuffer::filled(2, 2, RgbTriplet::new(10, 20, 30));
//! let after = before.map_pixels(|src, dst| {
//!     for (d, s) in dst.iter_mut().zip(src) {
//!         *d = 255 - *s;
//!     }
//! });
//!
//! assert_eq!(before.sample(0, 0).unwrap(), RgbTriplet::new(10, 20, 30));
//! assert_eq!(after.sample(0, 0).unwrap(), RgbTriplet::new(245, 235, 225));
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! pixtune-core (this crate)
//!    ^
//!    +-- pixtune-lut (tone curves, lookup tables)
//!    +-- pixtune-ops (transform operators, pipeline)
//!    +-- pixtune-palette (median-cut palette extraction)
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` - Parallel row iteration in [`PixelBuffer::map_pixels`] (enabled by default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod color;
pub mod error;

pub use buffer::{Channels, PixelBuffer};
pub use color::{
    hsv_to_rgb, hsv_to_rgb_f32, rgb_to_hsv, rgb_to_hsv_f32, ColorModel, ColorTriplet, Hsv,
    HsvTriplet, Rgb, RgbTriplet, HUE_RANGE,
};
pub use error::{Error, Result};

/// Prelude module for convenient imports.
///
/// ```
/// use pixtune_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::{Channels, PixelBuffer};
    pub use crate::color::{hsv_to_rgb, rgb_to_hsv, HsvTriplet, RgbTriplet};
    pub use crate::error::{Error, Result};
}
