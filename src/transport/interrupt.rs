//! # Interrupt Handling
//!
//! Decides what a Ctrl-C should do at the moment it arrives.
//!
//! Blocking `open`/`write` calls on a dead device are restarted after a
//! signal, so a cancel flag alone cannot stop them. The rule is:
//!
//! | When | First Ctrl-C | Second Ctrl-C |
//! |------|--------------|---------------|
//! | Transmission armed | raise the [`CancelToken`] | exit |
//! | Anything else (decode, layout, preview) | exit | exit |

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::device::CancelToken;

/// Conventional exit status for a process stopped by SIGINT.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Outcome of one delivered interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalAction {
    /// The running transmission stops at its next phase boundary
    Cancel,
    /// The process should terminate now
    Exit,
}

/// Shared between the signal handler and the print path.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    token: CancelToken,
    armed: Arc<AtomicBool>,
    signals: Arc<AtomicUsize>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token raised by the first interrupt of an armed transmission.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Route interrupts to the cancel token until the guard is dropped.
    pub fn arm(&self) -> ArmedGuard<'_> {
        self.armed.store(true, Ordering::SeqCst);
        ArmedGuard(self)
    }

    /// Record one interrupt and say what to do about it.
    pub fn on_signal(&self) -> SignalAction {
        let earlier = self.signals.fetch_add(1, Ordering::SeqCst);
        if self.armed.load(Ordering::SeqCst) && earlier == 0 {
            self.token.cancel();
            SignalAction::Cancel
        } else {
            SignalAction::Exit
        }
    }
}

/// Disarms the [`Interrupt`] when dropped.
#[derive(Debug)]
pub struct ArmedGuard<'a>(&'a Interrupt);

impl Drop for ArmedGuard<'_> {
    fn drop(&mut self) {
        self.0.armed.store(false, Ordering::SeqCst);
    }
}
