//! # Raster Preview
//!
//! Writes a packed raster back out as a black-and-white PNG, so a print can
//! be checked without paper.

use std::path::Path;

use image::{GrayImage, Luma};

use crate::error::PrintError;
use crate::render::raster::Raster;

/// Expand a packed raster into an 8-bit image (black dot = 0, paper = 255).
///
/// Padding columns are dropped; the image is exactly `width × height`.
pub fn to_image(raster: &Raster) -> GrayImage {
    GrayImage::from_fn(raster.width() as u32, raster.height() as u32, |x, y| {
        if raster.dot(x as usize, y as usize) {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

/// Save a raster as a PNG file.
///
/// ## Errors
///
/// `Image` if the file cannot be created or encoded.
pub fn save_png(path: &Path, raster: &Raster) -> Result<(), PrintError> {
    to_image(raster).save(path)?;
    Ok(())
}
