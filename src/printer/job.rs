//! # Print Jobs
//!
//! The one pipeline every print goes through:
//!
//! ```text
//! GrayscaleSource ──dither + pack──► Raster ──frame──► RasterCommand ──transmit──► device
//! ```
//!
//! Photos, cards and the calibration ramp differ only in how they produce
//! their source or raster.

use std::fmt;
use std::io::Write;

use tracing::info;

use super::config::PrinterConfig;
use crate::error::PrintError;
use crate::protocol::graphics::{self, RasterCommand};
use crate::render::dither::Ditherer;
use crate::render::ramp::LightnessRamp;
use crate::render::raster::{self, Raster};
use crate::render::source::GrayscaleSource;
use crate::transport::{CancelToken, Settle, ThreadSleep, Transmitter};

/// Dimensions of a rasterized job, as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintSummary {
    pub width: usize,
    pub bytes_per_row: usize,
    pub height: usize,
}

impl PrintSummary {
    pub fn of(raster: &Raster) -> Self {
        Self {
            width: raster.width(),
            bytes_per_row: raster.bytes_per_row(),
            height: raster.height(),
        }
    }
}

impl fmt::Display for PrintSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Width px: {} Bytes/row: {} Height px: {}",
            self.width, self.bytes_per_row, self.height
        )
    }
}

/// # Printer
///
/// Owns the configuration, ditherer and transmitter for one device.
///
/// ## Example
///
/// ```no_run
/// use lpprint::{PrinterConfig, printer::Printer, render::source::PixelGrid};
///
/// let mut printer = Printer::new(PrinterConfig::default());
/// let gray = PixelGrid::filled(384, 40, 128);
/// let summary = printer.print(&gray)?;
/// println!("{}", summary);
/// # Ok::<(), lpprint::PrintError>(())
/// ```
#[derive(Debug)]
pub struct Printer<S = ThreadSleep> {
    config: PrinterConfig,
    ditherer: Ditherer,
    transmitter: Transmitter<S>,
}

impl Printer<ThreadSleep> {
    pub fn new(config: PrinterConfig) -> Self {
        Self::with_settle(config, ThreadSleep)
    }
}

impl<S: Settle> Printer<S> {
    /// Build a printer with a custom settle implementation.
    pub fn with_settle(config: PrinterConfig, settle: S) -> Self {
        let ditherer = config.ditherer();
        let transmitter = Transmitter::with_settle(config.settle_delay(), settle);
        Self {
            config,
            ditherer,
            transmitter,
        }
    }

    /// Abort transmissions once `token` is raised.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.transmitter = self.transmitter.with_cancel(token);
        self
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    pub fn transmitter(&self) -> &Transmitter<S> {
        &self.transmitter
    }

    /// Dither and pack a grayscale source.
    pub fn rasterize(&self, source: &dyn GrayscaleSource) -> Raster {
        raster::pack(source, &self.ditherer)
    }

    /// The calibration gradient at the configured width.
    pub fn ramp(&self, height: usize) -> Raster {
        let ramp = LightnessRamp::new(self.config.width_dots, &self.config.matrix);
        raster::pack_with(ramp.width(), height, |x, y| ramp.is_black(x, y))
    }

    /// Rasterize `source` and send it to the configured device.
    pub fn print(&mut self, source: &dyn GrayscaleSource) -> Result<PrintSummary, PrintError> {
        let raster = self.rasterize(source);
        self.print_raster(raster)
    }

    /// Frame an already packed raster and send it to the configured device.
    ///
    /// Framing happens before the device is touched, so oversized rasters
    /// fail with `DimensionOverflow` without any I/O.
    pub fn print_raster(&mut self, raster: Raster) -> Result<PrintSummary, PrintError> {
        let (summary, command) = Self::frame(raster)?;
        self.transmitter.transmit(&self.config.device, &command)?;
        info!(device = %self.config.device.display(), %summary, "print complete");
        Ok(summary)
    }

    /// Like [`Printer::print_raster`], but into an already open sink.
    pub fn send_raster<W: Write>(&mut self, sink: &mut W, raster: Raster) -> Result<PrintSummary, PrintError> {
        let (summary, command) = Self::frame(raster)?;
        self.transmitter.send(sink, &command)?;
        Ok(summary)
    }

    fn frame(raster: Raster) -> Result<(PrintSummary, RasterCommand), PrintError> {
        let summary = PrintSummary::of(&raster);
        let command = graphics::frame_raster(raster)?;
        Ok((summary, command))
    }
}
