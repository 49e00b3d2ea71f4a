//! # lpprint - Thermal Line Printer Library
//!
//! lpprint prints grayscale images on ESC/POS-compatible thermal receipt
//! printers attached as raw character devices (`/dev/usb/lp0`). It provides:
//!
//! - **Dithering**: Bayer 8x8 ordered dithering from 0-255 luminance
//! - **Raster packing**: MSB-first bit packing with padded rows
//! - **Protocol**: Reset + `GS v 0` raster command framing
//! - **Transport**: The timed clear / initialize / payload write sequence
//! - **Composition**: Image file scaling and tweet-card layout
//!
//! ## Quick Start
//!
//! ```no_run
//! use lpprint::{
//!     PrinterConfig,
//!     compose::load_image,
//!     printer::Printer,
//! };
//!
//! let config = PrinterConfig::default();
//! let photo = load_image("cat.jpg".as_ref(), config.width_dots)?;
//!
//! let mut printer = Printer::new(config);
//! let summary = printer.print(&photo)?;
//! println!("{}", summary);
//!
//! # Ok::<(), lpprint::error::PrintError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`render`] | Grayscale sources, dithering, raster packing |
//! | [`protocol`] | Reset and raster command builders |
//! | [`transport`] | Device write sequence |
//! | [`printer`] | Configuration and the print pipeline |
//! | [`compose`] | Image files and tweet cards |
//! | [`preview`] | PNG output of a packed raster |
//! | [`error`] | Error types |

pub mod compose;
pub mod error;
pub mod preview;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use error::PrintError;
pub use printer::{PrinterConfig, Printer};
pub use transport::Transmitter;
