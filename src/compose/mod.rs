//! # Composition
//!
//! Producers of [`PixelGrid`](crate::render::source::PixelGrid) sources
//! from files and text.
//!
//! - [`image`]: Decode and scale image files to the print width
//! - [`card`]: Profile picture, username, wrapped text and date on one canvas
//! - [`text`]: Bitmap and TTF text faces used by cards

pub mod card;
pub mod image;
pub mod text;

pub use card::{Card, CardFaces};
pub use image::load_image;
