//! # Raster Bit Image Command
//!
//! Frames a packed raster into the `GS v 0` command understood by
//! ESC/POS-compatible 58mm thermal printers.
//!
//! ## Command Layout
//!
//! ```text
//! ┌──────────┬──────────────────────────────────────────┬────────────────┐
//! │ reset    │ raster header                            │ payload        │
//! │ 1B 40    │ 1D 76 30 00 xL xH yL yH                  │ xL+xH*256 bytes│
//! │ (ESC @)  │ (GS v 0, m = 0 normal, no scaling)       │ × yL+yH*256 rows│
//! └──────────┴──────────────────────────────────────────┴────────────────┘
//! ```
//!
//! ## Width and Height Encoding
//!
//! Both dimensions use 16-bit little-endian encoding:
//!
//! ```text
//! bytes_per_row = xL + (xH × 256)
//! height_dots   = yL + (yH × 256)
//!
//! Example: 48 bytes wide = [0x30, 0x00]
//! Example: 500 rows high = [0xF4, 0x01]
//! ```
//!
//! Values that do not fit 16 bits are rejected rather than truncated.

use super::commands::{GS, init, u16_le};
use crate::error::PrintError;
use crate::render::raster::Raster;

/// Raster mode byte `m`: normal density, no scaling.
pub const MODE_NORMAL: u8 = 0;

/// Length of the `GS v 0` header in bytes.
pub const HEADER_LEN: usize = 8;

/// A framed print command: reset + header, then the payload.
///
/// The two parts are kept apart because the transmitter sends them in
/// separate, timed writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterCommand {
    preamble: Vec<u8>,
    payload: Vec<u8>,
}

impl RasterCommand {
    /// Reset bytes followed by the 8-byte raster header.
    pub fn preamble(&self) -> &[u8] {
        &self.preamble
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The full command as it appears on the wire.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.preamble.len() + self.payload.len());
        bytes.extend_from_slice(&self.preamble);
        bytes.extend_from_slice(&self.payload);
        bytes
    }
}

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
/// | Decimal | 29 118 48 m xL xH yL yH d1...dk |
///
/// ## Errors
///
/// `DimensionOverflow` when either value exceeds 65535.
///
/// ## Example
///
/// ```
/// use lpprint::protocol::graphics;
///
/// let header = graphics::raster_header(48, 200)?;
/// assert_eq!(header, [0x1D, 0x76, 0x30, 0x00, 0x30, 0x00, 0xC8, 0x00]);
/// # Ok::<(), lpprint::PrintError>(())
/// ```
pub fn raster_header(bytes_per_row: usize, height: usize) -> Result<[u8; HEADER_LEN], PrintError> {
    let [xl, xh] = u16_le(fit_u16("bytes per row", bytes_per_row)?);
    let [yl, yh] = u16_le(fit_u16("height", height)?);

    Ok([GS, b'v', b'0', MODE_NORMAL, xl, xh, yl, yh])
}

/// Frame a packed payload into a complete print command.
///
/// ## Errors
///
/// - `DimensionOverflow` when a dimension exceeds 65535
/// - `InvalidRaster` when `payload.len() != bytes_per_row * height`
pub fn frame(bytes_per_row: usize, height: usize, payload: Vec<u8>) -> Result<RasterCommand, PrintError> {
    let header = raster_header(bytes_per_row, height)?;

    let expected_len = bytes_per_row * height;
    if payload.len() != expected_len {
        return Err(PrintError::InvalidRaster(format!(
            "payload is {} bytes, expected {} ({} bytes × {} rows)",
            payload.len(),
            expected_len,
            bytes_per_row,
            height
        )));
    }

    let mut preamble = Vec::with_capacity(2 + HEADER_LEN);
    preamble.extend_from_slice(&init());
    preamble.extend_from_slice(&header);

    Ok(RasterCommand { preamble, payload })
}

/// Frame a packed [`Raster`], taking ownership of its payload.
pub fn frame_raster(raster: Raster) -> Result<RasterCommand, PrintError> {
    let bytes_per_row = raster.bytes_per_row();
    let height = raster.height();
    frame(bytes_per_row, height, raster.into_data())
}

fn fit_u16(field: &'static str, value: usize) -> Result<u16, PrintError> {
    u16::try_from(value).map_err(|_| PrintError::DimensionOverflow { field, value })
}

// ============================================================================
// TESTS
// ============================================================================
