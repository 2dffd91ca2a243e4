//! Quantized 3-D color histogram.
//!
//! Each channel is truncated to `bits` significant bits, giving a cube of
//! side `2^bits`. Every cell keeps the number of pixels that fell into it and
//! the sums of their original (unquantized) channel values, so box averages
//! can be computed exactly later.

use pixtune_core::{Channels, PixelBuffer};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Largest depth built in parallel. Each rayon job owns a full histogram, so
/// deeper cubes are built on one thread.
#[cfg(feature = "parallel")]
const PARALLEL_MAX_BITS: u8 = 5;

/// One histogram cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cell {
    pub count: u64,
    pub sum: [u64; 3],
}

impl Cell {
    #[inline]
    fn add(&mut self, rgb: [u8; 3]) {
        self.count += 1;
        for (s, v) in self.sum.iter_mut().zip(rgb) {
            *s += v as u64;
        }
    }

    #[inline]
    pub fn merge(&mut self, other: &Cell) {
        self.count += other.count;
        for (s, o) in self.sum.iter_mut().zip(other.sum) {
            *s += o;
        }
    }
}

/// Dense histogram over the quantized RGB cube.
#[derive(Debug, Clone)]
pub(crate) struct Histogram {
    bits: u8,
    cells: Vec<Cell>,
}

impl Histogram {
    pub fn new(bits: u8) -> Self {
        let side = 1usize << bits;
        Self {
            bits,
            cells: vec![Cell::default(); side * side * side],
        }
    }

    /// Builds the histogram of every pixel in `buffer`.
    ///
    /// Grayscale pixels count as `(g, g, g)`.
    pub fn from_buffer(buffer: &PixelBuffer, bits: u8) -> Self {
        let row_len = buffer.width() as usize * buffer.channel_count();
        let channels = buffer.channels();
        let data = buffer.data();

        #[cfg(feature = "parallel")]
        if bits <= PARALLEL_MAX_BITS {
            return data
                .par_chunks(row_len)
                .fold(
                    || Histogram::new(bits),
                    |mut hist, row| {
                        hist.add_row(row, channels);
                        hist
                    },
                )
                .reduce(|| Histogram::new(bits), Histogram::merged);
        }

        let mut hist = Histogram::new(bits);
        for row in data.chunks(row_len) {
            hist.add_row(row, channels);
        }
        hist
    }

    fn add_row(&mut self, row: &[u8], channels: Channels) {
        match channels {
            Channels::Rgb => {
                for px in row.chunks_exact(3) {
                    self.add([px[0], px[1], px[2]]);
                }
            }
            Channels::Gray => {
                for &g in row {
                    self.add([g, g, g]);
                }
            }
        }
    }

    #[inline]
    fn add(&mut self, rgb: [u8; 3]) {
        let shift = 8 - self.bits;
        let idx = self.index([rgb[0] >> shift, rgb[1] >> shift, rgb[2] >> shift]);
        self.cells[idx].add(rgb);
    }

    #[cfg(feature = "parallel")]
    fn merged(mut self, other: Histogram) -> Histogram {
        for (a, b) in self.cells.iter_mut().zip(&other.cells) {
            a.merge(b);
        }
        self
    }

    /// Cube side length (`2^bits`).
    #[inline]
    pub fn side(&self) -> u16 {
        1 << self.bits
    }

    /// Cell index of quantized coordinates.
    #[inline]
    pub fn index(&self, q: [u8; 3]) -> usize {
        let b = self.bits as usize;
        ((q[0] as usize) << (2 * b)) | ((q[1] as usize) << b) | q[2] as usize
    }

    #[inline]
    pub fn cell(&self, q: [u8; 3]) -> &Cell {
        &self.cells[self.index(q)]
    }

    /// Total pixel count.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|c| c.count).sum()
    }
}
