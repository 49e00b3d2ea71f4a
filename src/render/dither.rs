//! # Bayer 8x8 Ordered Dithering
//!
//! Converts 0-255 luminance into black/white dot decisions for a printer
//! that can only burn a dot or leave the paper blank.
//!
//! ## Convention
//!
//! - Luminance `0` is black, `255` is white.
//! - A dot is printed when the pixel is **at or darker than** the local
//!   threshold, so pure black (0) prints at every position, including the
//!   matrix cell whose threshold is 0.
//!
//! ## Threshold Matrix
//!
//! Each position `(x, y)` looks up `matrix[y mod 8][x mod 8]`, a value in
//! `0..64`, and scales it into luminance space:
//!
//! ```text
//! threshold = floor(value * 255 / 64)      // 0..=251
//! black     = gray <= threshold
//! ```
//!
//! The default matrix:
//!
//! ```text
//!     0   1   2   3   4   5   6   7   (x mod 8)
//!   ┌───┬───┬───┬───┬───┬───┬───┬───┐
//! 0 │ 0 │48 │12 │60 │ 3 │51 │15 │63 │
//! 1 │32 │16 │44 │28 │35 │19 │47 │31 │
//! 2 │ 8 │56 │ 4 │52 │11 │59 │ 7 │55 │
//! 3 │40 │24 │36 │20 │43 │27 │39 │23 │
//! 4 │ 2 │50 │14 │62 │ 1 │49 │13 │61 │
//! 5 │34 │18 │46 │30 │33 │17 │45 │29 │
//! 6 │10 │58 │ 6 │54 │ 9 │57 │ 5 │53 │
//! 7 │42 │26 │38 │22 │41 │25 │37 │21 │
//!   └───┴───┴───┴───┴───┴───┴───┴───┘
//! (y mod 8)
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use lpprint::render::dither::Ditherer;
//!
//! let ditherer = Ditherer::default();
//!
//! assert!(!ditherer.dither(255, 3, 7)); // white never prints
//! assert!(ditherer.dither(0, 0, 0));    // black always prints
//! ```

use serde::{Deserialize, Serialize};

use crate::error::PrintError;

/// Bayer 8x8 dithering matrix, indexed `[y mod 8][x mod 8]`.
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 48, 12, 60, 3, 51, 15, 63],
    [32, 16, 44, 28, 35, 19, 47, 31],
    [8, 56, 4, 52, 11, 59, 7, 55],
    [40, 24, 36, 20, 43, 27, 39, 23],
    [2, 50, 14, 62, 1, 49, 13, 61],
    [34, 18, 46, 30, 33, 17, 45, 29],
    [10, 58, 6, 54, 9, 57, 5, 53],
    [42, 26, 38, 22, 41, 25, 37, 21],
];

/// Number of matrix levels (values range `0..LEVELS`).
pub const LEVELS: u8 = 64;

/// A validated 8x8 threshold matrix.
///
/// Deserializes from a nested TOML/array form and rejects any entry
/// outside `0..64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[[u8; 8]; 8]", into = "[[u8; 8]; 8]")]
pub struct DitherMatrix([[u8; 8]; 8]);

impl DitherMatrix {
    /// Build a matrix, checking every entry is below 64.
    pub fn new(values: [[u8; 8]; 8]) -> Result<Self, PrintError> {
        for (y, row) in values.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value >= LEVELS {
                    return Err(PrintError::InvalidRaster(format!(
                        "dither matrix value {} at ({}, {}) must be below {}",
                        value, x, y, LEVELS
                    )));
                }
            }
        }
        Ok(Self(values))
    }

    /// Raw matrix value for a pixel position.
    #[inline]
    pub fn value(&self, x: usize, y: usize) -> u8 {
        self.0[y & 7][x & 7]
    }

    pub fn values(&self) -> &[[u8; 8]; 8] {
        &self.0
    }
}

impl Default for DitherMatrix {
    fn default() -> Self {
        Self(BAYER8)
    }
}

impl TryFrom<[[u8; 8]; 8]> for DitherMatrix {
    type Error = PrintError;

    fn try_from(values: [[u8; 8]; 8]) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<DitherMatrix> for [[u8; 8]; 8] {
    fn from(matrix: DitherMatrix) -> Self {
        matrix.0
    }
}

/// Ordered ditherer over a fixed threshold matrix.
///
/// Thresholds are precomputed once; [`Ditherer::dither`] is a table lookup
/// and a compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ditherer {
    thresholds: [[u8; 8]; 8],
}

impl Ditherer {
    pub fn new(matrix: &DitherMatrix) -> Self {
        let mut thresholds = [[0u8; 8]; 8];
        for (y, row) in matrix.values().iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                thresholds[y][x] = scale_threshold(value);
            }
        }
        Self { thresholds }
    }

    /// Luminance threshold for a pixel position, in `0..=251`.
    #[inline]
    pub fn threshold(&self, x: usize, y: usize) -> u8 {
        self.thresholds[y & 7][x & 7]
    }

    /// Decide whether a pixel prints black.
    ///
    /// ## Parameters
    ///
    /// - `gray`: Luminance, 0 = black, 255 = white
    /// - `x`, `y`: Pixel position
    ///
    /// ## Returns
    ///
    /// `true` for a black dot, `false` for white paper.
    #[inline]
    pub fn dither(&self, gray: u8, x: usize, y: usize) -> bool {
        gray <= self.threshold(x, y)
    }
}

impl Default for Ditherer {
    fn default() -> Self {
        Self::new(&DitherMatrix::default())
    }
}

/// `floor(value * 255 / 64)`, exact in integer arithmetic.
#[inline]
fn scale_threshold(value: u8) -> u8 {
    ((value as u16 * 255) / LEVELS as u16) as u8
}

// ============================================================================
// TESTS
// ============================================================================
