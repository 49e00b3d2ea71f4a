//! # ESC/POS Command Bytes
//!
//! Control bytes and basic commands shared by the raster protocol.
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for graphics commands such as `GS v 0` (raster bit image).
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
///
/// A lone LF is sent before a job to flush whatever the printer may still
/// be holding from an earlier, interrupted job.
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## Example
///
/// ```
/// use lpprint::protocol::commands;
///
/// assert_eq!(commands::init(), [0x1B, 0x40]);
/// ```
#[inline]
pub const fn init() -> [u8; 2] {
    [ESC, b'@']
}

/// Split a u16 into little-endian bytes
///
/// ## Example
///
/// ```
/// use lpprint::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(200), [0xC8, 0x00]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(init(), [0x1B, 0x40]);
    }

    #[test]
    fn test_control_bytes() {
        assert_eq!(ESC, 27);
        assert_eq!(GS, 29);
        assert_eq!(LF, b'\n');
    }

    #[test]
    fn test_u16_le() {
        assert_eq!(u16_le(0x0000), [0x00, 0x00]);
        assert_eq!(u16_le(0x00FF), [0xFF, 0x00]);
        assert_eq!(u16_le(0xFF00), [0x00, 0xFF]);
        assert_eq!(u16_le(0x1234), [0x34, 0x12]);
        assert_eq!(u16_le(384), [0x80, 0x01]);
    }
}
