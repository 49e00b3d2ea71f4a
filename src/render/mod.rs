//! # Rendering Module
//!
//! Turns continuous-tone input into packed printer rasters.
//!
//! ## Modules
//!
//! - [`source`]: The [`GrayscaleSource`](source::GrayscaleSource) trait and [`PixelGrid`](source::PixelGrid)
//! - [`dither`]: Bayer 8x8 ordered dithering
//! - [`ramp`]: The calibration lightness ramp
//! - [`raster`]: MSB-first bit packing with row padding
//!
//! ## Usage Example
//!
//! ```
//! use lpprint::render::{dither::Ditherer, raster, source::PixelGrid};
//!
//! // Horizontal gradient, black on the left
//! let gradient = PixelGrid::from_fn(384, 100, |x, _y| (x * 255 / 383) as u8);
//! let packed = raster::pack(&gradient, &Ditherer::default());
//!
//! assert_eq!(packed.data().len(), 48 * 100);
//! ```

pub mod dither;
pub mod ramp;
pub mod raster;
pub mod source;
