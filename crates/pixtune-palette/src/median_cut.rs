//! Median-cut box splitting over a [`Histogram`].
//!
//! Boxes live in a `Vec` and are referred to by index. A max-heap keyed on
//! `(population, Reverse(index))` holds the boxes that can still be split,
//! so the most populated box is split first and ties go to the older box.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::histogram::{Cell, Histogram};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// An axis-aligned region of the quantized cube, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColorBox {
    pub lo: [u8; 3],
    pub hi: [u8; 3],
    pub count: u64,
}

impl ColorBox {
    /// Extent of each axis in cells, minus one.
    #[inline]
    fn spans(&self) -> [u8; 3] {
        [
            self.hi[0] - self.lo[0],
            self.hi[1] - self.lo[1],
            self.hi[2] - self.lo[2],
        ]
    }

    /// Longest axis, preferring red over green over blue on ties.
    fn longest_axis(&self) -> usize {
        let spans = self.spans();
        let mut axis = 0;
        for a in 1..3 {
            if spans[a] > spans[axis] {
                axis = a;
            }
        }
        axis
    }

    /// A box can be split if it holds at least two pixels spread over more
    /// than one cell.
    fn splittable(&self) -> bool {
        self.count >= 2 && self.spans().iter().any(|&s| s > 0)
    }
}

/// Calls `f` for every cell inside `[lo, hi]`.
fn for_each_cell(hist: &Histogram, lo: [u8; 3], hi: [u8; 3], mut f: impl FnMut([u8; 3], &Cell)) {
    for r in lo[0]..=hi[0] {
        for g in lo[1]..=hi[1] {
            for b in lo[2]..=hi[2] {
                let q = [r, g, b];
                f(q, hist.cell(q));
            }
        }
    }
}

/// Shrinks `[lo, hi]` to the bounding box of its populated cells.
///
/// Returns `None` if the region holds no pixels.
fn shrink(hist: &Histogram, lo: [u8; 3], hi: [u8; 3]) -> Option<ColorBox> {
    let mut min = [u8::MAX; 3];
    let mut max = [0u8; 3];
    let mut count = 0u64;
    for_each_cell(hist, lo, hi, |q, cell| {
        if cell.count > 0 {
            count += cell.count;
            for a in 0..3 {
                min[a] = min[a].min(q[a]);
                max[a] = max[a].max(q[a]);
            }
        }
    });
    (count > 0).then_some(ColorBox {
        lo: min,
        hi: max,
        count,
    })
}

/// Splits `bx` along its longest axis at the median population plane.
///
/// Both halves are non-empty because `bx` is already shrunk to its
/// populated cells: the planes at `lo` and `hi` each hold pixels.
fn split(hist: &Histogram, bx: &ColorBox) -> Option<(ColorBox, ColorBox)> {
    let axis = bx.longest_axis();
    let (lo, hi) = (bx.lo[axis], bx.hi[axis]);

    let mut planes = vec![0u64; (hi - lo) as usize + 1];
    for_each_cell(hist, bx.lo, bx.hi, |q, cell| {
        planes[(q[axis] - lo) as usize] += cell.count;
    });

    // First plane where the running total reaches half the population,
    // never the last plane so the upper half keeps at least one
    let mut cumulative = 0u64;
    let mut cut = hi - 1;
    for (i, &n) in planes.iter().enumerate() {
        cumulative += n;
        if cumulative * 2 >= bx.count {
            cut = (lo + i as u8).min(hi - 1);
            break;
        }
    }

    let mut left_hi = bx.hi;
    left_hi[axis] = cut;
    let mut right_lo = bx.lo;
    right_lo[axis] = cut + 1;

    Some((shrink(hist, bx.lo, left_hi)?, shrink(hist, right_lo, bx.hi)?))
}

/// Runs median cut until `max_boxes` boxes exist or none can be split.
///
/// Boxes are returned in creation order.
pub(crate) fn median_cut(hist: &Histogram, max_boxes: usize) -> Vec<ColorBox> {
    let top = (hist.side() - 1) as u8;
    let Some(root) = shrink(hist, [0; 3], [top; 3]) else {
        return Vec::new();
    };

    let mut boxes = vec![root];
    let mut heap = BinaryHeap::new();
    if root.splittable() {
        heap.push((root.count, Reverse(0usize)));
    }

    while boxes.len() < max_boxes {
        let Some((_, Reverse(idx))) = heap.pop() else {
            break;
        };
        let Some((left, right)) = split(hist, &boxes[idx]) else {
            continue;
        };
        trace!(idx, left = left.count, right = right.count, "split box");

        boxes[idx] = left;
        boxes.push(right);
        let right_idx = boxes.len() - 1;
        if left.splittable() {
            heap.push((left.count, Reverse(idx)));
        }
        if right.splittable() {
            heap.push((right.count, Reverse(right_idx)));
        }
    }

    debug!(boxes = boxes.len(), requested = max_boxes, "median cut done");
    boxes
}

/// Pixel count and summed original samples of every cell in `bx`.
pub(crate) fn box_totals(hist: &Histogram, bx: &ColorBox) -> Cell {
    let mut total = Cell::default();
    for_each_cell(hist, bx.lo, bx.hi, |_, cell| total.merge(cell));
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixtune_core::{PixelBuffer, RgbTriplet};

    fn two_tone(left: u32) -> Histogram {
        let img = PixelBuffer::from_fn(10, 1, |x, _| {
            if x < left {
                RgbTriplet::new(0, 0, 0)
            } else {
                RgbTriplet::new(255, 0, 0)
            }
        });
        Histogram::from_buffer(&img, 5)
    }

    #[test]
    fn test_root_is_shrunk() {
        let boxes = median_cut(&two_tone(4), 1);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].lo, [0, 0, 0]);
        assert_eq!(boxes[0].hi, [31, 0, 0]);
        assert_eq!(boxes[0].count, 10);
    }

    #[test]
    fn test_split_separates_clusters() {
        let hist = two_tone(4);
        let boxes = median_cut(&hist, 8);
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].count, 4);
        assert_eq!(boxes[1].count, 6);
        assert_eq!(box_totals(&hist, &boxes[1]).sum, [6 * 255, 0, 0]);
    }

    #[test]
    fn test_longest_axis_ties() {
        let bx = ColorBox {
            lo: [0, 0, 0],
            hi: [4, 4, 2],
            count: 5,
        };
        assert_eq!(bx.longest_axis(), 0);
        let bx = ColorBox {
            lo: [0, 0, 0],
            hi: [1, 4, 4],
            count: 5,
        };
        assert_eq!(bx.longest_axis(), 1);
    }

    #[test]
    fn test_single_cell_not_splittable() {
        let bx = ColorBox {
            lo: [3, 3, 3],
            hi: [3, 3, 3],
            count: 100,
        };
        assert!(!bx.splittable());
    }

    #[test]
    fn test_box_count_never_exceeds_limit() {
        let img = PixelBuffer::from_fn(32, 32, |x, y| {
            RgbTriplet::new((x * 8) as u8, (y * 8) as u8, ((x + y) * 4) as u8)
        });
        let hist = Histogram::from_buffer(&img, 5);
        for k in 1..=12 {
            let boxes = median_cut(&hist, k);
            assert_eq!(boxes.len(), k);
            assert_eq!(boxes.iter().map(|b| b.count).sum::<u64>(), hist.total());
        }
    }
}
