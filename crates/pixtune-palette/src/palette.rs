//! Palette result types.

use std::fmt;

use pixtune_core::RgbTriplet;

/// One palette color with the number of pixels it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    /// Average color of the pixels in this swatch's box.
    pub color: RgbTriplet,
    /// Number of pixels in the box.
    pub population: u64,
}

impl Swatch {
    /// Hex notation of the color, e.g. `#ff8000`.
    pub fn hex(&self) -> String {
        self.color.to_hex()
    }

    /// Fraction of `total` pixels represented by this swatch.
    pub fn share(&self, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.population as f64 / total as f64
        }
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} px)", self.hex(), self.population)
    }
}

/// Representative colors ordered by non-increasing population.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Palette {
    pub(crate) fn new(swatches: Vec<Swatch>) -> Self {
        Self { swatches }
    }

    /// Number of colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    /// Returns `true` if the palette has no colors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// Swatches, most populated first.
    #[inline]
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// Colors without populations, most populated first.
    pub fn colors(&self) -> Vec<RgbTriplet> {
        self.swatches.iter().map(|s| s.color).collect()
    }

    /// Sum of all swatch populations (the pixel count of the source image).
    pub fn total_population(&self) -> u64 {
        self.swatches.iter().map(|s| s.population).sum()
    }

    /// Iterates over the swatches.
    pub fn iter(&self) -> std::slice::Iter<'_, Swatch> {
        self.swatches.iter()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Swatch;
    type IntoIter = std::slice::Iter<'a, Swatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.swatches.iter()
    }
}

impl IntoIterator for Palette {
    type Item = Swatch;
    type IntoIter = std::vec::IntoIter<Swatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.swatches.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swatch_format() {
        let s = Swatch {
            color: RgbTriplet::new(255, 128, 0),
            population: 42,
        };
        assert_eq!(s.hex(), "#ff8000");
        assert_eq!(s.to_string(), "#ff8000 (42 px)");
        assert_eq!(s.share(84), 0.5);
        assert_eq!(s.share(0), 0.0);
    }

    #[test]
    fn test_palette_accessors() {
        let p = Palette::new(vec![
            Swatch {
                color: RgbTriplet::new(1, 2, 3),
                population: 7,
            },
            Swatch {
                color: RgbTriplet::new(4, 5, 6),
                population: 3,
            },
        ]);
        assert_eq!(p.len(), 2);
        assert_eq!(p.total_population(), 10);
        assert_eq!(p.colors(), vec![RgbTriplet::new(1, 2, 3), RgbTriplet::new(4, 5, 6)]);
        assert_eq!((&p).into_iter().count(), 2);
    }
}
