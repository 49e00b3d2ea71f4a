//! # Image Files
//!
//! Decodes an image file, converts it to 8-bit grayscale and scales it to
//! the print width, keeping the aspect ratio.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage};
use tracing::debug;

use crate::error::PrintError;
use crate::render::source::PixelGrid;

/// Open an image file, failing with the crate's error taxonomy.
///
/// ## Errors
///
/// - `SourceNotFound` if `path` does not exist
/// - `UnsupportedImage` if the file cannot be decoded
pub fn open(path: &Path) -> Result<DynamicImage, PrintError> {
    if !path.exists() {
        return Err(PrintError::SourceNotFound(path.to_path_buf()));
    }
    image::open(path).map_err(|e| PrintError::UnsupportedImage {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load `path` as a grayscale grid exactly `width` dots wide.
pub fn load_image(path: &Path, width: usize) -> Result<PixelGrid, PrintError> {
    let image = open(path)?;
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "decoded image"
    );
    fit_width(&image, width)
}

/// Scale an image to `width`, height following the aspect ratio.
///
/// The new height is `floor(h * width / w)`, never less than one row.
///
/// ## Errors
///
/// `DimensionOverflow` if the scaled height cannot be framed, checked
/// before any pixels are resampled.
pub fn fit_width(image: &DynamicImage, width: usize) -> Result<PixelGrid, PrintError> {
    let height = scaled_height(image.width() as usize, image.height() as usize, width)?;
    if height > u16::MAX as usize {
        return Err(PrintError::DimensionOverflow {
            field: "height",
            value: height,
        });
    }
    let gray = image.to_luma8();
    let resized = resize(&gray, width, height);
    Ok(PixelGrid::from(resized))
}

/// Scale an image to `height`, width following the aspect ratio.
pub fn fit_height(image: &DynamicImage, height: usize) -> Result<GrayImage, PrintError> {
    let gray = image.to_luma8();
    let width = scaled_height(gray.height() as usize, gray.width() as usize, height)?;
    Ok(resize(&gray, width, height))
}

fn resize(gray: &GrayImage, width: usize, height: usize) -> GrayImage {
    if gray.width() as usize == width && gray.height() as usize == height {
        return gray.clone();
    }
    imageops::resize(gray, width as u32, height as u32, FilterType::Lanczos3)
}

/// `floor(other * target / side)`, at least 1.
fn scaled_height(side: usize, other: usize, target: usize) -> Result<usize, PrintError> {
    if side == 0 || other == 0 || target == 0 {
        return Err(PrintError::InvalidRaster(format!(
            "cannot scale a {}x{} image to {} dots",
            side, other, target
        )));
    }
    let scaled = (other as u64 * target as u64) / side as u64;
    Ok((scaled as usize).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::source::GrayscaleSource;
    use image::{Luma, Rgb, RgbImage};

    #[test]
    fn test_fit_width_keeps_aspect() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(100, 50, Luma([90])));
        let grid = fit_width(&image, 384).unwrap();
        assert_eq!(grid.width(), 384);
        assert_eq!(grid.height(), 192);
    }

    #[test]
    fn test_fit_width_rounds_down() {
        let image = DynamicImage::ImageLuma8(GrayImage::new(300, 101));
        let grid = fit_width(&image, 384).unwrap();
        // 101 * 384 / 300 = 129.28
        assert_eq!(grid.height(), 129);
    }

    #[test]
    fn test_fit_width_minimum_one_row() {
        let image = DynamicImage::ImageLuma8(GrayImage::new(1000, 1));
        assert_eq!(fit_width(&image, 384).unwrap().height(), 1);
    }

    #[test]
    fn test_fit_width_converts_color() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([255, 255, 255])));
        let grid = fit_width(&image, 8).unwrap();
        assert!(grid.pixels().iter().all(|&g| g == 255));
    }

    #[test]
    fn test_fit_height() {
        let image = DynamicImage::ImageLuma8(GrayImage::new(80, 160));
        let thumb = fit_height(&image, 40).unwrap();
        assert_eq!(thumb.dimensions(), (20, 40));
    }

    #[test]
    fn test_tall_image_rejected_before_resize() {
        let image = DynamicImage::ImageLuma8(GrayImage::new(1, 10_000));
        let err = fit_width(&image, 384).unwrap_err();
        assert!(matches!(
            err,
            PrintError::DimensionOverflow {
                field: "height",
                value: 3_840_000
            }
        ));
    }

    #[test]
    fn test_tallest_frameable_height_accepted() {
        let image = DynamicImage::ImageLuma8(GrayImage::new(2, 65_535));
        assert_eq!(fit_width(&image, 2).unwrap().height(), 65_535);
    }

    #[test]
    fn test_zero_width_rejected() {
        let image = DynamicImage::ImageLuma8(GrayImage::new(10, 10));
        assert!(fit_width(&image, 0).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_image(Path::new("/nonexistent/cat.png"), 384).unwrap_err();
        assert!(matches!(err, PrintError::SourceNotFound(_)));
    }

    #[test]
    fn test_undecodable_file() {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        std::fs::write(file.path(), b"definitely not a png").unwrap();
        let err = load_image(file.path(), 384).unwrap_err();
        assert!(matches!(err, PrintError::UnsupportedImage { .. }));
    }

    #[test]
    fn test_load_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.png");
        GrayImage::from_pixel(48, 48, Luma([0])).save(&path).unwrap();

        let grid = load_image(&path, 96).unwrap();
        assert_eq!((grid.width(), grid.height()), (96, 96));
        assert!(grid.pixels().iter().all(|&g| g < 8));
    }
}
