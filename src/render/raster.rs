//! # Raster Packing
//!
//! Packs a grid of dot decisions into the byte layout the printer expects.
//!
//! ## Bit Packing
//!
//! - Bit 7 (MSB) = leftmost dot of the group of 8
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (burn a dot), 0 = white
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```
//!
//! ## Row Padding
//!
//! Each row is padded on the right to a multiple of 8 dots. Padding is
//! always white and never carries source data:
//!
//! ```text
//! width_padded  = width + ((8 - width mod 8) mod 8)
//! bytes_per_row = width_padded / 8
//!
//! width 384 -> 48 bytes/row
//! width 385 -> 392 padded, 49 bytes/row (columns 385..391 white)
//! ```
//!
//! Rows are concatenated with no separators, so the payload is exactly
//! `bytes_per_row * height` bytes.

use tracing::debug;

use super::dither::Ditherer;
use super::source::GrayscaleSource;

/// A packed monochrome bitmap, ready to be framed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    bytes_per_row: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Dot width before padding.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Row count in dots.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Packed payload, `bytes_per_row * height` bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Read a dot back out of the packed payload.
    ///
    /// `x` may address padding columns (`width..bytes_per_row * 8`), which
    /// always read white.
    pub fn dot(&self, x: usize, y: usize) -> bool {
        let byte = self.data[y * self.bytes_per_row + x / 8];
        (byte >> (7 - (x % 8))) & 1 == 1
    }
}

/// Bytes needed for one row of `width` dots.
#[inline]
pub fn bytes_per_row(width: usize) -> usize {
    width.div_ceil(8)
}

/// Pack one row of dot decisions into bytes, MSB first.
///
/// A row whose length is not a multiple of 8 is padded with white.
///
/// ## Example
///
/// ```
/// use lpprint::render::raster::pack_row;
///
/// assert_eq!(pack_row(&[true, true, true, true, false, false, false, false]), vec![0xF0]);
/// // 12 dots pack into 2 bytes (4 bits padding)
/// assert_eq!(pack_row(&[true; 12]), vec![0xFF, 0xF0]);
/// ```
pub fn pack_row(dots: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; bytes_per_row(dots.len())];

    for (i, &dot) in dots.iter().enumerate() {
        if dot {
            bytes[i / 8] |= 1 << (7 - (i % 8));
        }
    }

    bytes
}

/// Pack an arbitrary dot function over a `width × height` grid.
///
/// `is_black(x, y)` is only called for `x < width`; padding columns are
/// forced white.
pub fn pack_with<F>(width: usize, height: usize, is_black: F) -> Raster
where
    F: Fn(usize, usize) -> bool,
{
    let bytes_per_row = bytes_per_row(width);
    let mut data = Vec::with_capacity(bytes_per_row * height);
    let mut row = vec![false; width];

    for y in 0..height {
        for (x, dot) in row.iter_mut().enumerate() {
            *dot = is_black(x, y);
        }
        data.extend(pack_row(&row));
    }

    debug!(width, height, bytes_per_row, bytes = data.len(), "packed raster");

    Raster {
        width,
        height,
        bytes_per_row,
        data,
    }
}

/// Dither a grayscale source and pack it.
///
/// ## Example
///
/// ```
/// use lpprint::render::{dither::Ditherer, raster, source::PixelGrid};
///
/// let white = PixelGrid::filled(384, 10, 255);
/// let packed = raster::pack(&white, &Ditherer::default());
///
/// assert_eq!(packed.bytes_per_row(), 48);
/// assert!(packed.data().iter().all(|&b| b == 0x00));
/// ```
pub fn pack<S>(source: &S, ditherer: &Ditherer) -> Raster
where
    S: GrayscaleSource + ?Sized,
{
    pack_with(source.width(), source.height(), |x, y| {
        ditherer.dither(source.gray(x, y), x, y)
    })
}

// ============================================================================
// TESTS
// ============================================================================
