//! # Printer Module
//!
//! Printer configuration and the shared print pipeline.
//!
//! ## Modules
//!
//! - [`config`]: Device path, width, timing and dither settings
//! - [`job`]: Rasterize, frame and transmit a print

pub mod config;
pub mod job;

pub use config::PrinterConfig;
pub use job::{PrintSummary, Printer};
