//! # Printer Transport Layer
//!
//! This module sends framed commands to the printer.
//!
//! ## Available Transports
//!
//! - [`device`]: Raw character device (`/dev/usb/lp0`), with the timed
//!   clear / initialize / payload write sequence
//!
//! Serial adaptors that appear as TTYs are put in raw mode by [`tty`].
//! [`interrupt`] maps Ctrl-C onto the cancel token while a transmission runs.

pub mod device;
pub mod interrupt;
mod tty;

pub use device::{CancelToken, Phase, Settle, ThreadSleep, TransmitState, Transmitter};
pub use interrupt::{EXIT_INTERRUPTED, Interrupt, SignalAction};
