//! Pixel buffer type shared by every pixtune operator.
//!
//! # Memory Layout
//!
//! Samples are stored in **row-major** order, top-to-bottom, one `u8` per
//! channel, channels interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! Grayscale buffers hold one sample per pixel.
//!
//! # Ownership
//!
//! The sample vector sits behind an [`Arc`], so cloning a buffer (for example
//! to keep the "before" image of a preview) never copies pixels. There is no
//! mutable access: operators build a fresh buffer with [`PixelBuffer::map_pixels`]
//! or [`PixelBuffer::from_raw`].

use crate::{Error, Result, RgbTriplet};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Channel layout of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Channels {
    /// One sample per pixel.
    Gray,
    /// Three samples per pixel in R, G, B order.
    #[default]
    Rgb,
}

impl Channels {
    /// Number of samples per pixel.
    #[inline]
    pub const fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
        }
    }

    /// Parses a raw channel count.
    ///
    /// ```
    /// use pixtune_core::Channels;
    ///
    /// assert_eq!(Channels::from_count(3).unwrap(), Channels::Rgb);
    /// assert!(Channels::from_count(4).is_err());
    /// ```
    pub fn from_count(count: usize) -> Result<Self> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            n => Err(Error::UnsupportedChannels(n)),
        }
    }
}

/// Immutable 8-bit image buffer.
///
/// Invariant: `data.len() == width * height * channels.count()`.
///
/// # Example
///
/// ```rust
/// use pixtune_core::{Channels, PixelBuffer, RgbTriplet};
///
/// let img = PixelBuffer::from_raw(2, 1, Channels::Rgb, vec![255, 0, 0, 0, 0, 255]).unwrap();
/// assert_eq!(img.sample(1, 0).unwrap(), RgbTriplet::new(0, 0, 255));
/// assert!(img.sample(2, 0).is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Arc<Vec<u8>>,
    width: u32,
    height: u32,
    channels: Channels,
}

impl PixelBuffer {
    /// Creates a buffer filled with zeros.
    pub fn new(width: u32, height: u32, channels: Channels) -> Self {
        let len = width as usize * height as usize * channels.count();
        Self {
            data: Arc::new(vec![0; len]),
            width,
            height,
            channels,
        }
    }

    /// Creates a buffer from existing samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` differs from
    /// `width * height * channels` or if that product overflows.
    pub fn from_raw(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(channels.count()))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "sample count overflows"))?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
            channels,
        })
    }

    /// Creates an RGB buffer where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: RgbTriplet) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * 3);
        for _ in 0..pixel_count {
            data.extend_from_slice(&color.to_array());
        }
        Self {
            data: Arc::new(data),
            width,
            height,
            channels: Channels::Rgb,
        }
    }

    /// Creates a grayscale buffer where every sample is `value`.
    pub fn filled_gray(width: u32, height: u32, value: u8) -> Self {
        Self {
            data: Arc::new(vec![value; width as usize * height as usize]),
            width,
            height,
            channels: Channels::Gray,
        }
    }

    /// Creates an RGB buffer by evaluating `f(x, y)` for every pixel.
    ///
    /// ```
    /// use pixtune_core::{PixelBuffer, RgbTriplet};
    ///
    /// let ramp = PixelBuffer::from_fn(4, 1, |x, _| RgbTriplet::new(x as u8 * 10, 0, 0));
    /// assert_eq!(ramp.sample(3, 0).unwrap().r(), 30);
    /// ```
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> RgbTriplet,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y).to_array());
            }
        }
        Self {
            data: Arc::new(data),
            width,
            height,
            channels: Channels::Rgb,
        }
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Returns the number of samples per pixel.
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channels.count()
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the buffer has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Fails with [`Error::EmptyBuffer`] if the buffer has zero area.
    #[inline]
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::empty_buffer(self.width, self.height));
        }
        Ok(())
    }

    /// Returns the raw samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns one row of samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `y >= height`.
    pub fn row(&self, y: u32) -> Result<&[u8]> {
        if y >= self.height {
            return Err(Error::out_of_bounds(0, y, self.width, self.height));
        }
        let row_len = self.width as usize * self.channel_count();
        let start = y as usize * row_len;
        Ok(&self.data[start..start + row_len])
    }

    /// Returns the samples of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinates are outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Result<&[u8]> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        let c = self.channel_count();
        let offset = (y as usize * self.width as usize + x as usize) * c;
        Ok(&self.data[offset..offset + c])
    }

    /// Reads the pixel at `(x, y)` as an RGB triplet.
    ///
    /// Grayscale samples are replicated into all three components. This is
    /// the only checked accessor; out-of-range coordinates fail with
    /// [`Error::OutOfBounds`].
    pub fn sample(&self, x: u32, y: u32) -> Result<RgbTriplet> {
        let px = self.pixel(x, y)?;
        Ok(match self.channels {
            Channels::Gray => RgbTriplet::new(px[0], px[0], px[0]),
            Channels::Rgb => RgbTriplet::new(px[0], px[1], px[2]),
        })
    }

    /// Iterates over pixels as sample slices of length [`Self::channel_count`].
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(self.channel_count())
    }

    /// Returns an RGB copy of this buffer. RGB buffers are returned as a
    /// cheap clone.
    pub fn to_rgb(&self) -> PixelBuffer {
        match self.channels {
            Channels::Rgb => self.clone(),
            Channels::Gray => {
                let data = self.data.iter().flat_map(|&g| [g, g, g]).collect();
                PixelBuffer {
                    data: Arc::new(data),
                    width: self.width,
                    height: self.height,
                    channels: Channels::Rgb,
                }
            }
        }
    }

    /// Produces a new buffer of the same size and layout by calling
    /// `f(src_pixel, dst_pixel)` for every pixel.
    ///
    /// `f` sees one pixel at a time and must not depend on visiting order;
    /// with the `rayon` feature rows are processed in parallel.
    pub fn map_pixels<F>(&self, f: F) -> PixelBuffer
    where
        F: Fn(&[u8], &mut [u8]) + Send + Sync,
    {
        if self.is_empty() {
            return self.clone();
        }
        let c = self.channel_count();
        let row_len = self.width as usize * c;
        let mut out = vec![0u8; self.data.len()];

        let map_row = |(src_row, dst_row): (&[u8], &mut [u8])| {
            for (src, dst) in src_row.chunks_exact(c).zip(dst_row.chunks_exact_mut(c)) {
                f(src, dst);
            }
        };

        #[cfg(feature = "rayon")]
        self.data
            .par_chunks(row_len)
            .zip(out.par_chunks_mut(row_len))
            .for_each(map_row);

        #[cfg(not(feature = "rayon"))]
        self.data
            .chunks(row_len)
            .zip(out.chunks_mut(row_len))
            .for_each(map_row);

        PixelBuffer {
            data: Arc::new(out),
            width: self.width,
            height: self.height,
            channels: self.channels,
        }
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_validates_length() {
        assert!(PixelBuffer::from_raw(2, 2, Channels::Rgb, vec![0; 12]).is_ok());
        let err = PixelBuffer::from_raw(2, 2, Channels::Rgb, vec![0; 11]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));
        assert!(PixelBuffer::from_raw(2, 2, Channels::Gray, vec![0; 4]).is_ok());
    }

    #[test]
    fn test_sample_out_of_bounds() {
        let img = PixelBuffer::filled(3, 2, RgbTriplet::new(1, 2, 3));
        assert_eq!(img.sample(2, 1).unwrap(), RgbTriplet::new(1, 2, 3));
        assert_eq!(img.sample(3, 0), Err(Error::out_of_bounds(3, 0, 3, 2)));
        assert!(img.sample(0, 2).unwrap_err().is_bounds_error());
    }

    #[test]
    fn test_gray_sample_replicates() {
        let img = PixelBuffer::filled_gray(1, 1, 77);
        assert_eq!(img.sample(0, 0).unwrap(), RgbTriplet::new(77, 77, 77));
        assert_eq!(img.channel_count(), 1);
    }

    #[test]
    fn test_empty() {
        let img = PixelBuffer::new(0, 5, Channels::Rgb);
        assert!(img.is_empty());
        assert!(img.data().is_empty());
        assert!(img.ensure_not_empty().unwrap_err().is_empty_buffer());
        // Mapping an empty buffer yields an empty buffer instead of panicking
        assert!(img.map_pixels(|_, _| {}).is_empty());
    }

    #[test]
    fn test_map_pixels_leaves_input_untouched() {
        let src = PixelBuffer::from_fn(4, 3, |x, y| RgbTriplet::new(x as u8, y as u8, 9));
        let dst = src.map_pixels(|s, d| {
            d[0] = s[1];
            d[1] = s[0];
            d[2] = s[2];
        });
        assert_eq!(src.sample(3, 1).unwrap(), RgbTriplet::new(3, 1, 9));
        assert_eq!(dst.sample(3, 1).unwrap(), RgbTriplet::new(1, 3, 9));
        assert_eq!(dst.dimensions(), (4, 3));
    }

    #[test]
    fn test_to_rgb_and_rows() {
        let gray = PixelBuffer::from_raw(2, 2, Channels::Gray, vec![1, 2, 3, 4]).unwrap();
        let rgb = gray.to_rgb();
        assert_eq!(rgb.channels(), Channels::Rgb);
        assert_eq!(rgb.row(1).unwrap(), &[3, 3, 3, 4, 4, 4]);
        assert!(rgb.row(2).unwrap_err().is_bounds_error());
        assert_eq!(rgb.pixels().count(), 4);
    }
}
