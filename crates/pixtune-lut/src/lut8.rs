//! 256-entry lookup table.
//!
//! An 8-bit sample has exactly 256 possible values, so a table of 256 output
//! samples describes any point transform without interpolation. Each color
//! channel can have its own table, or all channels can share one.

/// Number of entries in a [`Lut8`] table.
pub const LUT_SIZE: usize = 256;

/// An 8-bit to 8-bit lookup table.
///
/// # Structure
///
/// - one table for red (or all channels if mono)
/// - optional tables for green and blue
///
/// # Example
///
/// ```rust
/// use pixtune_lut::Lut8;
///
/// let invert = Lut8::from_fn(|v| 255 - v);
/// assert_eq!(invert.apply(10), 245);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lut8 {
    /// Table for red channel (or all channels if mono)
    pub r: [u8; LUT_SIZE],
    /// Table for green channel (None if mono)
    pub g: Option<[u8; LUT_SIZE]>,
    /// Table for blue channel (None if mono)
    pub b: Option<[u8; LUT_SIZE]>,
}

impl Default for Lut8 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Lut8 {
    /// Creates an identity (pass-through) table.
    ///
    /// ```rust
    /// use pixtune_lut::Lut8;
    ///
    /// let lut = Lut8::identity();
    /// assert!((0..=255u8).all(|v| lut.apply(v) == v));
    /// ```
    pub fn identity() -> Self {
        Self::from_fn(|v| v)
    }

    /// Samples `f` at every input value into a mono table.
    pub fn from_fn<F: Fn(u8) -> u8>(f: F) -> Self {
        let mut r = [0u8; LUT_SIZE];
        for (i, out) in r.iter_mut().enumerate() {
            *out = f(i as u8);
        }
        Self { r, g: None, b: None }
    }

    /// Creates a three-channel table from separate RGB tables.
    pub fn from_rgb(r: [u8; LUT_SIZE], g: [u8; LUT_SIZE], b: [u8; LUT_SIZE]) -> Self {
        Self {
            r,
            g: Some(g),
            b: Some(b),
        }
    }

    /// Returns true if this is a single-channel (mono) table.
    #[inline]
    pub fn is_mono(&self) -> bool {
        self.g.is_none() && self.b.is_none()
    }

    /// Returns the table used for `channel` (0 = R, 1 = G, 2 = B).
    ///
    /// Mono tables return the shared table for every channel.
    #[inline]
    pub fn table(&self, channel: usize) -> &[u8; LUT_SIZE] {
        match channel {
            1 => self.g.as_ref().unwrap_or(&self.r),
            2 => self.b.as_ref().unwrap_or(&self.r),
            _ => &self.r,
        }
    }

    /// Looks up a sample in the red (or shared) table.
    #[inline]
    pub fn apply(&self, value: u8) -> u8 {
        self.r[value as usize]
    }

    /// Looks up a sample in the table of `channel`.
    #[inline]
    pub fn apply_channel(&self, channel: usize, value: u8) -> u8 {
        self.table(channel)[value as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let lut = Lut8::identity();
        assert!(lut.is_mono());
        assert_eq!(lut.apply(0), 0);
        assert_eq!(lut.apply(128), 128);
        assert_eq!(lut.apply(255), 255);
    }

    #[test]
    fn test_rgb() {
        let lut = Lut8::from_rgb([1; 256], [2; 256], [3; 256]);
        assert!(!lut.is_mono());
        assert_eq!([lut.apply_channel(0, 200), lut.apply_channel(1, 100), lut.apply_channel(2, 0)], [1, 2, 3]);
    }

    #[test]
    fn test_mono_shares_table() {
        let lut = Lut8::from_fn(|v| v / 2);
        assert_eq!(lut.table(2), lut.table(0));
        assert_eq!(lut.apply_channel(1, 100), 50);
    }
}
