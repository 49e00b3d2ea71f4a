//! # Lightness Ramp
//!
//! The calibration gradient: light on the left edge, dark on the right.
//!
//! This is deliberately **not** the [`Ditherer`](super::dither::Ditherer)
//! contract. The ramp value grows with darkness instead of luminance, and
//! its thresholds carry a half-step offset:
//!
//! ```text
//! darkness  = floor(x / (width - 1) * 255)
//! threshold = floor((matrix[y mod 8][x mod 8] + 0.5) * 255 / 64)
//! black     = darkness > threshold
//! ```
//!
//! The ramp yields dot decisions directly and is packed with
//! [`pack_with`](super::raster::pack_with).

use super::dither::{DitherMatrix, LEVELS};

/// Horizontal darkness ramp over an ordered-dither matrix.
#[derive(Debug, Clone, Copy)]
pub struct LightnessRamp {
    width: usize,
    thresholds: [[u8; 8]; 8],
}

impl LightnessRamp {
    pub fn new(width: usize, matrix: &DitherMatrix) -> Self {
        let mut thresholds = [[0u8; 8]; 8];
        for (y, row) in matrix.values().iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                // (v + 0.5) * 255 / 64 == (2v + 1) * 255 / 128
                thresholds[y][x] = (((2 * value as u32 + 1) * 255) / (2 * LEVELS as u32)) as u8;
            }
        }
        Self { width, thresholds }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Darkness of column `x`, 0 at the left edge and 255 at the right.
    pub fn darkness(&self, x: usize) -> u8 {
        if self.width <= 1 {
            return 0;
        }
        ((x * 255) / (self.width - 1)).min(255) as u8
    }

    /// Whether the dot at `(x, y)` prints black.
    #[inline]
    pub fn is_black(&self, x: usize, y: usize) -> bool {
        self.darkness(x) > self.thresholds[y & 7][x & 7]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_darkness_endpoints() {
        let ramp = LightnessRamp::new(384, &DitherMatrix::default());
        assert_eq!(ramp.darkness(0), 0);
        assert_eq!(ramp.darkness(383), 255);
        // 191 * 255 / 383 = 127.17
        assert_eq!(ramp.darkness(191), 127);
    }

    #[test]
    fn test_left_edge_is_white() {
        let ramp = LightnessRamp::new(384, &DitherMatrix::default());
        for y in 0..16 {
            assert!(!ramp.is_black(0, y));
        }
    }

    #[test]
    fn test_right_edge_mostly_black() {
        let ramp = LightnessRamp::new(384, &DitherMatrix::default());
        // Right-most 8x8 block: darkness 248..=255 against thresholds up to 253
        let black = (0..8)
            .flat_map(|y| (376..384).map(move |x| (x, y)))
            .filter(|&(x, y)| ramp.is_black(x, y))
            .count();
        assert!(black >= 60, "expected a nearly solid block, got {}", black);
    }

    #[test]
    fn test_half_step_thresholds() {
        let ramp = LightnessRamp::new(2, &DitherMatrix::default());
        // Value 0 -> floor(0.5 * 255 / 64) = 1; value 63 -> floor(63.5 * 255 / 64) = 253
        assert_eq!(ramp.thresholds[0][0], 1);
        assert_eq!(ramp.thresholds[0][7], 253);
    }

    #[test]
    fn test_single_column_is_white() {
        let ramp = LightnessRamp::new(1, &DitherMatrix::default());
        assert_eq!(ramp.darkness(0), 0);
        assert!(!ramp.is_black(0, 0));
    }
}
