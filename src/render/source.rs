//! # Grayscale Sources
//!
//! Anything that can be printed is first a grid of 0-255 luminance values.
//! [`GrayscaleSource`] is the seam between producers (decoded images,
//! composed cards, test fixtures) and the raster packer.

use image::GrayImage;

use crate::error::PrintError;

/// A `width × height` grid of luminance values (0 = black, 255 = white).
pub trait GrayscaleSource {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Luminance at `(x, y)`. Callers only ask for in-bounds positions.
    fn gray(&self, x: usize, y: usize) -> u8;
}

/// An owned, immutable row-major grid of luminance values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelGrid {
    /// Wrap a row-major buffer. Fails when `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, PrintError> {
        if pixels.len() != width * height {
            return Err(PrintError::InvalidRaster(format!(
                "pixel buffer holds {} values, expected {} ({}x{})",
                pixels.len(),
                width * height,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A grid where every pixel has the same luminance.
    pub fn filled(width: usize, height: usize, gray: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![gray; width * height],
        }
    }

    /// Build a grid by evaluating `f(x, y)` at every position.
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> u8,
    {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl GrayscaleSource for PixelGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn gray(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }
}

impl From<GrayImage> for PixelGrid {
    fn from(image: GrayImage) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;
        Self {
            width,
            height,
            pixels: image.into_raw(),
        }
    }
}

impl GrayscaleSource for GrayImage {
    fn width(&self) -> usize {
        GrayImage::width(self) as usize
    }

    fn height(&self) -> usize {
        GrayImage::height(self) as usize
    }

    #[inline]
    fn gray(&self, x: usize, y: usize) -> u8 {
        self.get_pixel(x as u32, y as u32)[0]
    }
}
