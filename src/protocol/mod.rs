//! # Printer Protocol
//!
//! Byte-level command builders for the printer's raster protocol.
//!
//! ## Module Structure
//!
//! - [`commands`]: Control bytes, reset, little-endian helpers
//! - [`graphics`]: The `GS v 0` raster bit image command
//!
//! ## Usage Example
//!
//! ```
//! use lpprint::protocol::graphics;
//!
//! let payload = vec![0xAA; 48 * 24]; // Vertical stripes
//! let command = graphics::frame(48, 24, payload)?;
//!
//! assert_eq!(&command.preamble()[..2], &[0x1B, 0x40]);
//! # Ok::<(), lpprint::PrintError>(())
//! ```

pub mod commands;
pub mod graphics;

pub use graphics::{RasterCommand, frame};
