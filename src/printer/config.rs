//! # Printer Configuration
//!
//! Everything that used to be a hard-coded constant (device node, print
//! width, settle delay, dither matrix) lives in [`PrinterConfig`], so tests
//! and alternate printers can inject their own values.
//!
//! ## Defaults
//!
//! | Property | Value |
//! |----------|-------|
//! | Device | `/dev/usb/lp0` |
//! | Print width | 384 dots (48 bytes, 58mm paper) |
//! | Settle delay | 20 ms |
//! | Dither matrix | Bayer 8x8 |
//!
//! ## Config File
//!
//! An optional TOML file overrides any subset of the defaults:
//!
//! ```toml
//! device = "/dev/usb/lp1"
//! width_dots = 576
//! settle_delay_ms = 30
//! font = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::PrintError;
use crate::render::dither::{DitherMatrix, Ditherer};
use crate::transport::device::{DEFAULT_DEVICE, SETTLE_DELAY_MS};

/// Default print width in dots (58mm paper at 203 DPI)
pub const DEFAULT_WIDTH_DOTS: usize = 384;

/// # Printer Configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrinterConfig {
    /// Raw device node the printer is attached to
    pub device: PathBuf,

    /// Print width in dots; images are scaled to this width
    pub width_dots: usize,

    /// Pause between protocol phases, in milliseconds
    pub settle_delay_ms: u64,

    /// Ordered-dither threshold matrix
    pub matrix: DitherMatrix,

    /// TTF font for card text; the built-in bitmap font is used when unset
    pub font: Option<PathBuf>,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE),
            width_dots: DEFAULT_WIDTH_DOTS,
            settle_delay_ms: SETTLE_DELAY_MS,
            matrix: DitherMatrix::default(),
            font: None,
        }
    }
}

impl PrinterConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Load a TOML config file.
    ///
    /// ## Errors
    ///
    /// `Config` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, PrintError> {
        let content = std::fs::read_to_string(path).map_err(|e| PrintError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml(&content).map_err(|e| PrintError::Config {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        })?;
        config.validate().map_err(|e| PrintError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, PrintError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject settings no print can be made with.
    ///
    /// ## Errors
    ///
    /// `InvalidRaster` if `width_dots` is zero.
    pub fn validate(&self) -> Result<(), PrintError> {
        if self.width_dots == 0 {
            return Err(PrintError::InvalidRaster(
                "print width must be at least 1 dot".to_string(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn ditherer(&self) -> Ditherer {
        Ditherer::new(&self.matrix)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::dither::BAYER8;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PrinterConfig::default();
        assert_eq!(config.device, PathBuf::from("/dev/usb/lp0"));
        assert_eq!(config.width_dots, 384);
        assert_eq!(config.settle_delay(), Duration::from_millis(20));
        assert_eq!(config.matrix.values(), &BAYER8);
        assert!(config.font.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PrinterConfig::from_toml("device = \"/dev/usb/lp1\"\nwidth_dots = 385\n").unwrap();
        assert_eq!(config.device, PathBuf::from("/dev/usb/lp1"));
        assert_eq!(config.width_dots, 385);
        assert_eq!(config.settle_delay_ms, 20);
    }

    #[test]
    fn test_matrix_override() {
        let rows = vec!["[1, 1, 1, 1, 1, 1, 1, 1]"; 8].join(", ");
        let config = PrinterConfig::from_toml(&format!("matrix = [{}]", rows)).unwrap();
        assert_eq!(config.matrix.values(), &[[1; 8]; 8]);
    }

    #[test]
    fn test_matrix_out_of_range_rejected() {
        let mut rows = vec!["[1, 1, 1, 1, 1, 1, 1, 1]"; 7];
        rows.push("[1, 1, 1, 1, 1, 1, 1, 99]");
        let result = PrinterConfig::from_toml(&format!("matrix = [{}]", rows.join(", ")));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(PrinterConfig::from_toml("widht_dots = 10").is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "settle_delay_ms = 50").unwrap();
        let config = PrinterConfig::load(file.path()).unwrap();
        assert_eq!(config.settle_delay(), Duration::from_millis(50));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PrinterConfig::load(Path::new("/nonexistent/lpprint.toml")).unwrap_err();
        assert!(matches!(err, PrintError::Config { .. }));
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = PrinterConfig {
            width_dots: 0,
            ..PrinterConfig::default()
        };
        assert!(matches!(config.validate(), Err(PrintError::InvalidRaster(_))));
        assert!(PrinterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_zero_width_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width_dots = 0").unwrap();
        let err = PrinterConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, PrintError::Config { .. }));
    }

    #[test]
    fn test_load_or_default() {
        assert_eq!(PrinterConfig::load_or_default(None).unwrap(), PrinterConfig::default());
    }
}
