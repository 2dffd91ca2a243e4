//! # pixtune-palette
//!
//! Median-cut palette extraction.
//!
//! Reduces an image to at most K representative colors:
//!
//! 1. Every channel is truncated to a few bits (5 by default), and pixels are
//!    counted in the resulting 3-D histogram (a 32x32x32 cube).
//! 2. Starting from one box around all populated cells, the most populated box
//!    is repeatedly split along its longest axis at the median pixel, until K
//!    boxes exist or every box is a single cell or holds a single pixel.
//! 3. Each box contributes the average of the original, unquantized pixels it
//!    contains. Colors are ordered by descending population.
//!
//! An image with fewer distinct colors than K yields fewer than K colors;
//! the palette is never padded.
//!
//! # Example
//!
//! ```rust
//! use pixtune_core::{PixelBuffer, RgbTriplet};
//! use pixtune_palette::extract_palette;
//!
//! let img = PixelBuffer::from_fn(10, 10, |x, _| {
//!     if x < 7 { RgbTriplet::new(250, 20, 20) } else { RgbTriplet::new(10, 10, 200) }
//! });
//! let palette = extract_palette(&img, 5).unwrap();
//!
//! assert_eq!(palette.len(), 2);
//! assert_eq!(palette.swatches()[0].color, RgbTriplet::new(250, 20, 20));
//! assert_eq!(palette.swatches()[0].population, 70);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod histogram;
mod median_cut;
mod palette;

pub use error::{PaletteError, PaletteResult};
pub use palette::{Palette, Swatch};

use histogram::Histogram;
use median_cut::{box_totals, median_cut};
use pixtune_core::{PixelBuffer, RgbTriplet};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Default number of palette colors.
pub const DEFAULT_MAX_COLORS: usize = 5;

/// Default histogram depth in bits per channel.
pub const DEFAULT_BITS: u8 = 5;

/// Deepest supported histogram (64x64x64 cells).
pub const MAX_BITS: u8 = 6;

/// Palette extraction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteOptions {
    /// Upper bound on the number of colors (K).
    pub max_colors: usize,
    /// Bits kept per channel when building the histogram, `1..=MAX_BITS`.
    pub bits: u8,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            max_colors: DEFAULT_MAX_COLORS,
            bits: DEFAULT_BITS,
        }
    }
}

impl PaletteOptions {
    /// Options with `max_colors` colors and the default depth.
    pub fn new(max_colors: usize) -> Self {
        Self {
            max_colors,
            ..Self::default()
        }
    }

    /// Sets the histogram depth.
    pub fn with_bits(mut self, bits: u8) -> Self {
        self.bits = bits;
        self
    }

    /// Checks that K is positive and the depth is supported.
    pub fn validate(&self) -> PaletteResult<()> {
        if self.max_colors == 0 {
            return Err(PaletteError::InvalidParameter(
                "palette size must be at least 1".into(),
            ));
        }
        if !(1..=MAX_BITS).contains(&self.bits) {
            return Err(PaletteError::InvalidParameter(format!(
                "histogram depth must be in 1..={MAX_BITS} bits, got {}",
                self.bits
            )));
        }
        Ok(())
    }
}

/// Extracts up to `k` representative colors with the default depth.
///
/// # Errors
///
/// - [`PaletteError::InvalidParameter`] if `k == 0`
/// - [`PaletteError::EmptyBuffer`] if `buffer` has zero area
pub fn extract_palette(buffer: &PixelBuffer, k: usize) -> PaletteResult<Palette> {
    extract_palette_with(buffer, &PaletteOptions::new(k))
}

/// Extracts a palette with explicit [`PaletteOptions`].
///
/// The result is deterministic: identical input and options always give the
/// same colors in the same order, with or without the `parallel` feature.
pub fn extract_palette_with(buffer: &PixelBuffer, options: &PaletteOptions) -> PaletteResult<Palette> {
    options.validate()?;
    if buffer.is_empty() {
        return Err(PaletteError::EmptyBuffer {
            width: buffer.width(),
            height: buffer.height(),
        });
    }
    let (width, height) = buffer.dimensions();
    trace!(width, height, k = options.max_colors, bits = options.bits, "extract_palette");

    let hist = Histogram::from_buffer(buffer, options.bits);
    debug_assert_eq!(hist.total(), buffer.pixel_count() as u64);
    let boxes = median_cut(&hist, options.max_colors);

    let mut swatches: Vec<Swatch> = boxes
        .iter()
        .map(|bx| {
            let totals = box_totals(&hist, bx);
            let n = totals.count;
            let avg = |sum: u64| ((sum + n / 2) / n) as u8;
            Swatch {
                color: RgbTriplet::new(avg(totals.sum[0]), avg(totals.sum[1]), avg(totals.sum[2])),
                population: n,
            }
        })
        .collect();
    // Stable: equal populations keep box creation order
    swatches.sort_by(|a, b| b.population.cmp(&a.population));

    debug!(colors = swatches.len(), "palette extracted");
    Ok(Palette::new(swatches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixtune_core::Channels;

    fn three_colors() -> PixelBuffer {
        // 6 red, 4 green, 2 blue
        PixelBuffer::from_fn(12, 1, |x, _| match x {
            0..=5 => RgbTriplet::new(220, 30, 30),
            6..=9 => RgbTriplet::new(30, 200, 40),
            _ => RgbTriplet::new(20, 40, 210),
        })
    }

    fn gradient() -> PixelBuffer {
        PixelBuffer::from_fn(64, 48, |x, y| {
            RgbTriplet::new((x * 4) as u8, (y * 5) as u8, ((x * y) % 256) as u8)
        })
    }

    #[test]
    fn test_single_color() {
        for (w, h) in [(1, 1), (3, 7), (100, 50)] {
            let img = PixelBuffer::filled(w, h, RgbTriplet::new(17, 99, 201));
            let palette = extract_palette(&img, 5).unwrap();
            assert_eq!(palette.len(), 1);
            assert_eq!(palette.swatches()[0].color, RgbTriplet::new(17, 99, 201));
            assert_eq!(palette.swatches()[0].population, (w * h) as u64);
        }
    }

    #[test]
    fn test_fewer_colors_than_k() {
        let palette = extract_palette(&three_colors(), 5).unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(
            palette.colors(),
            vec![
                RgbTriplet::new(220, 30, 30),
                RgbTriplet::new(30, 200, 40),
                RgbTriplet::new(20, 40, 210),
            ]
        );
        let pops: Vec<u64> = palette.iter().map(|s| s.population).collect();
        assert_eq!(pops, vec![6, 4, 2]);
    }

    #[test]
    fn test_at_most_k_ordered() {
        let img = gradient();
        for k in [1, 2, 5, 8, 16] {
            let palette = extract_palette(&img, k).unwrap();
            assert!(palette.len() <= k);
            assert_eq!(palette.total_population(), img.pixel_count() as u64);
            assert!(palette
                .swatches()
                .windows(2)
                .all(|w| w[0].population >= w[1].population));
        }
    }

    #[test]
    fn test_k_one_is_mean_color() {
        let img = PixelBuffer::from_raw(2, 1, Channels::Rgb, vec![0, 0, 0, 255, 101, 50]).unwrap();
        let palette = extract_palette(&img, 1).unwrap();
        // channel means, rounded half up
        assert_eq!(palette.colors(), vec![RgbTriplet::new(128, 51, 25)]);
    }

    #[test]
    fn test_gray_buffer() {
        let img = PixelBuffer::from_raw(4, 1, Channels::Gray, vec![10, 10, 10, 240]).unwrap();
        let palette = extract_palette(&img, 5).unwrap();
        assert_eq!(
            palette.colors(),
            vec![RgbTriplet::new(10, 10, 10), RgbTriplet::new(240, 240, 240)]
        );
    }

    #[test]
    fn test_deterministic() {
        let img = gradient();
        let opts = PaletteOptions::new(7).with_bits(4);
        assert_eq!(
            extract_palette_with(&img, &opts).unwrap(),
            extract_palette_with(&img, &opts).unwrap()
        );
    }

    #[test]
    fn test_invalid_parameters() {
        let img = gradient();
        assert!(extract_palette(&img, 0).unwrap_err().is_invalid_parameter());
        for bits in [0u8, 7, 8] {
            let opts = PaletteOptions::default().with_bits(bits);
            assert!(extract_palette_with(&img, &opts).unwrap_err().is_invalid_parameter());
        }
    }

    #[test]
    fn test_empty_buffer() {
        let img = PixelBuffer::new(0, 5, Channels::Rgb);
        let err = extract_palette(&img, 5).unwrap_err();
        assert!(err.is_empty_buffer());
        assert_eq!(err, PaletteError::EmptyBuffer { width: 0, height: 5 });
    }
}
