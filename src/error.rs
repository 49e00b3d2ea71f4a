//! # Error Types
//!
//! This module defines the error type shared by every stage of a print job.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::transport::Phase;

/// Main error type for lpprint operations
#[derive(Debug, Error)]
pub enum PrintError {
    /// The printer device node does not exist. Nothing was written.
    #[error("Device {} not found", .0.display())]
    DeviceNotFound(PathBuf),

    /// An input image (photo or profile picture) does not exist
    #[error("Image {} not found", .0.display())]
    SourceNotFound(PathBuf),

    /// An input image exists but could not be decoded or converted
    #[error("Unsupported image {}: {reason}", path.display())]
    UnsupportedImage { path: PathBuf, reason: String },

    /// A raster dimension does not fit the 16-bit header field
    #[error("{field} of {value} exceeds the 16-bit raster header limit of 65535")]
    DimensionOverflow { field: &'static str, value: usize },

    /// An I/O error while opening, writing or flushing the device
    #[error("Write failed during {phase}: {source}")]
    TransmissionFailed {
        phase: Phase,
        #[source]
        source: io::Error,
    },

    /// The print was cancelled before the sequence completed
    #[error("Print cancelled during {phase}")]
    Cancelled { phase: Phase },

    /// Raster data or dither matrix is malformed
    #[error("Invalid raster: {0}")]
    InvalidRaster(String),

    /// Configuration file could not be read or parsed
    #[error("Config error in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// TTF font could not be loaded
    #[error("Font error: {0}")]
    Font(String),

    /// Encoding a preview image failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_single_line() {
        let errors = [
            PrintError::DeviceNotFound(PathBuf::from("/dev/usb/lp0")),
            PrintError::SourceNotFound(PathBuf::from("cat.png")),
            PrintError::DimensionOverflow {
                field: "height",
                value: 70000,
            },
            PrintError::TransmissionFailed {
                phase: Phase::Payload,
                source: io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"),
            },
        ];
        for err in errors {
            assert!(!err.to_string().contains('\n'), "{}", err);
        }
    }

    #[test]
    fn test_image_error_keeps_source() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err = PrintError::from(image::ImageError::IoError(io_err));
        match &err {
            PrintError::Image(image::ImageError::IoError(source)) => {
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_device_not_found_names_path() {
        let err = PrintError::DeviceNotFound(PathBuf::from("/dev/usb/lp0"));
        assert_eq!(err.to_string(), "Device /dev/usb/lp0 not found");
    }
}
