//! # Line Printer Device Transport
//!
//! Sends a framed raster command to a raw character device such as
//! `/dev/usb/lp0`.
//!
//! ## Write Sequence
//!
//! The printer firmware needs a short settling pause between protocol
//! phases. Each phase is written in one call and flushed before moving on:
//!
//! ```text
//! Idle ──LF, flush, settle──► Cleared ──ESC @ + GS v 0 header, flush, settle──► Initialized
//!                                                                                  │
//!                                           Done ◄──payload, flush── Transmitting ◄┘
//!
//! any I/O error ──► Failed(phase)      cancel token raised ──► Cancelled(phase)
//! ```
//!
//! The two settle waits (20 ms by default) are never merged or skipped.
//!
//! ## Limitations
//!
//! - The device is an unacknowledged byte sink: success only means the
//!   local writes returned without error.
//! - Writes have no timeout; a stalled device blocks the caller.
//! - A failure after the header leaves the printer mid-command. Nothing
//!   attempts to recover it.
//! - Nothing here serializes concurrent jobs; run one print at a time.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::tty;
use crate::error::PrintError;
use crate::protocol::commands::LF;
use crate::protocol::graphics::RasterCommand;

/// Default line printer device node
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

/// Default pause between protocol phases (milliseconds)
pub const SETTLE_DELAY_MS: u64 = 20;

/// The part of the write sequence an outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Opening the device node
    Open,
    /// Lone line feed that clears pending device state
    Clear,
    /// Reset and raster header
    Initialize,
    /// Raster payload
    Payload,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Open => "device open",
            Phase::Clear => "clear",
            Phase::Initialize => "initialize",
            Phase::Payload => "payload",
        };
        f.write_str(name)
    }
}

/// Where the write sequence stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitState {
    Idle,
    Cleared,
    Initialized,
    Transmitting,
    Done,
    Failed(Phase),
    Cancelled(Phase),
}

impl TransmitState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransmitState::Done | TransmitState::Failed(_) | TransmitState::Cancelled(_)
        )
    }

    fn from_error(err: &PrintError) -> Self {
        match err {
            PrintError::Cancelled { phase } => TransmitState::Cancelled(*phase),
            PrintError::TransmissionFailed { phase, .. } => TransmitState::Failed(*phase),
            _ => TransmitState::Failed(Phase::Open),
        }
    }
}

/// Blocking pause between phases. Swapped out in tests.
pub trait Settle {
    fn settle(&mut self, delay: Duration);
}

/// Real wall-clock pause.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl Settle for ThreadSleep {
    fn settle(&mut self, delay: Duration) {
        thread::sleep(delay);
    }
}

/// Shared flag that aborts a transmission at the next phase boundary.
///
/// Cloning shares the flag, so a signal handler or another thread can
/// hold one end.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// # Device Transmitter
///
/// Drives the timed write sequence over any [`Write`] sink.
///
/// ## Example
///
/// ```no_run
/// use lpprint::protocol::graphics;
/// use lpprint::transport::Transmitter;
///
/// let command = graphics::frame(48, 1, vec![0xFF; 48])?;
/// let mut transmitter = Transmitter::default();
/// transmitter.transmit("/dev/usb/lp0", &command)?;
/// # Ok::<(), lpprint::PrintError>(())
/// ```
#[derive(Debug)]
pub struct Transmitter<S = ThreadSleep> {
    settle: S,
    delay: Duration,
    cancel: Option<CancelToken>,
    state: TransmitState,
}

impl Transmitter<ThreadSleep> {
    pub fn new(delay: Duration) -> Self {
        Self::with_settle(delay, ThreadSleep)
    }
}

impl Default for Transmitter<ThreadSleep> {
    fn default() -> Self {
        Self::new(Duration::from_millis(SETTLE_DELAY_MS))
    }
}

impl<S: Settle> Transmitter<S> {
    /// Build a transmitter with a custom pause implementation.
    pub fn with_settle(delay: Duration, settle: S) -> Self {
        Self {
            settle,
            delay,
            cancel: None,
            state: TransmitState::Idle,
        }
    }

    /// Abort at the next phase boundary once `token` is raised.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn state(&self) -> TransmitState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn settle_impl(&self) -> &S {
        &self.settle
    }

    /// Open `path` and send `command` to it.
    ///
    /// ## Errors
    ///
    /// - `DeviceNotFound` if `path` does not exist (nothing is written)
    /// - `TransmissionFailed` if opening, writing or flushing fails
    /// - `Cancelled` if the cancel token is raised mid-sequence
    pub fn transmit<P: AsRef<Path>>(&mut self, path: P, command: &RasterCommand) -> Result<(), PrintError> {
        let path = path.as_ref();
        self.state = TransmitState::Idle;

        if !path.exists() {
            warn!(device = %path.display(), "device not found");
            self.state = TransmitState::Failed(Phase::Open);
            return Err(PrintError::DeviceNotFound(path.to_path_buf()));
        }

        // Unbuffered: every write goes straight to the driver. The handle
        // is dropped on every return path below.
        let mut device = OpenOptions::new()
            .write(true)
            .open(path)
            .and_then(|file| {
                tty::configure_raw_if_tty(&file)?;
                Ok(file)
            })
            .map_err(|source| {
                self.state = TransmitState::Failed(Phase::Open);
                PrintError::TransmissionFailed {
                    phase: Phase::Open,
                    source,
                }
            })?;

        debug!(device = %path.display(), "device opened");
        self.send(&mut device, command)
    }

    /// Run the write sequence against an already open sink.
    pub fn send<W: Write>(&mut self, sink: &mut W, command: &RasterCommand) -> Result<(), PrintError> {
        self.state = TransmitState::Idle;

        while !self.state.is_terminal() {
            match self.step(sink, command) {
                Ok(next) => {
                    debug!(from = ?self.state, to = ?next, "transmit state");
                    self.state = next;
                }
                Err(err) => {
                    self.state = TransmitState::from_error(&err);
                    warn!(state = ?self.state, error = %err, "transmission stopped");
                    return Err(err);
                }
            }
        }

        info!(
            preamble = command.preamble().len(),
            payload = command.payload().len(),
            "raster sent"
        );
        Ok(())
    }

    fn step<W: Write>(&mut self, sink: &mut W, command: &RasterCommand) -> Result<TransmitState, PrintError> {
        match self.state {
            TransmitState::Idle => {
                self.write_phase(sink, Phase::Clear, &[LF])?;
                self.wait(Phase::Clear)?;
                Ok(TransmitState::Cleared)
            }
            TransmitState::Cleared => {
                self.write_phase(sink, Phase::Initialize, command.preamble())?;
                self.wait(Phase::Initialize)?;
                Ok(TransmitState::Initialized)
            }
            TransmitState::Initialized => {
                self.check_cancel(Phase::Payload)?;
                Ok(TransmitState::Transmitting)
            }
            TransmitState::Transmitting => {
                self.write_phase(sink, Phase::Payload, command.payload())?;
                Ok(TransmitState::Done)
            }
            terminal => Ok(terminal),
        }
    }

    fn write_phase<W: Write>(&mut self, sink: &mut W, phase: Phase, bytes: &[u8]) -> Result<(), PrintError> {
        self.check_cancel(phase)?;
        sink.write_all(bytes)
            .and_then(|()| sink.flush())
            .map_err(|source| PrintError::TransmissionFailed { phase, source })?;
        debug!(%phase, bytes = bytes.len(), "phase written");
        Ok(())
    }

    fn wait(&mut self, phase: Phase) -> Result<(), PrintError> {
        self.settle.settle(self.delay);
        self.check_cancel(phase)
    }

    fn check_cancel(&self, phase: Phase) -> Result<(), PrintError> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(PrintError::Cancelled { phase }),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::graphics::frame;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Write(Vec<u8>),
        Flush,
        Settle(Duration),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct LoggingSink {
        log: Log,
        fail_on_write: Option<usize>,
        writes: usize,
    }

    impl Write for LoggingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.fail_on_write == Some(self.writes) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "printer unplugged"));
            }
            self.writes += 1;
            self.log.borrow_mut().push(Event::Write(buf.to_vec()));
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.log.borrow_mut().push(Event::Flush);
            Ok(())
        }
    }

    /// Raises the token during the settle with the given 1-based index.
    struct LoggingSettle {
        log: Log,
        settles: usize,
        cancel_at: Option<(usize, CancelToken)>,
    }

    impl Settle for LoggingSettle {
        fn settle(&mut self, delay: Duration) {
            self.settles += 1;
            self.log.borrow_mut().push(Event::Settle(delay));
            if let Some((at, token)) = &self.cancel_at
                && *at == self.settles
            {
                token.cancel();
            }
        }
    }

    fn harness(fail_on_write: Option<usize>) -> (LoggingSink, Transmitter<LoggingSettle>, Log) {
        let log: Log = Rc::default();
        let sink = LoggingSink {
            log: log.clone(),
            fail_on_write,
            writes: 0,
        };
        let settle = LoggingSettle {
            log: log.clone(),
            settles: 0,
            cancel_at: None,
        };
        let transmitter = Transmitter::with_settle(Duration::from_millis(SETTLE_DELAY_MS), settle);
        (sink, transmitter, log)
    }

    fn command() -> RasterCommand {
        frame(2, 2, vec![0xF0, 0x0F, 0xAA, 0x55]).unwrap()
    }

    #[test]
    fn test_sequence_order() {
        let (mut sink, mut transmitter, log) = harness(None);
        transmitter.send(&mut sink, &command()).unwrap();

        let settle = Duration::from_millis(20);
        assert_eq!(
            *log.borrow(),
            vec![
                Event::Write(vec![0x0A]),
                Event::Flush,
                Event::Settle(settle),
                Event::Write(vec![0x1B, 0x40, 0x1D, 0x76, 0x30, 0x00, 0x02, 0x00, 0x02, 0x00]),
                Event::Flush,
                Event::Settle(settle),
                Event::Write(vec![0xF0, 0x0F, 0xAA, 0x55]),
                Event::Flush,
            ]
        );
        assert_eq!(transmitter.state(), TransmitState::Done);
    }

    #[test]
    fn test_failure_in_header_phase_stops_sequence() {
        let (mut sink, mut transmitter, log) = harness(Some(1));
        let err = transmitter.send(&mut sink, &command()).unwrap_err();

        match err {
            PrintError::TransmissionFailed { phase, source } => {
                assert_eq!(phase, Phase::Initialize);
                assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(transmitter.state(), TransmitState::Failed(Phase::Initialize));
        // Only the clear phase reached the sink
        let writes = log.borrow().iter().filter(|e| matches!(e, Event::Write(_))).count();
        assert_eq!(writes, 1);
    }

    #[test]
    fn test_failure_in_payload_phase() {
        let (mut sink, mut transmitter, _log) = harness(Some(2));
        let err = transmitter.send(&mut sink, &command()).unwrap_err();
        assert!(matches!(
            err,
            PrintError::TransmissionFailed {
                phase: Phase::Payload,
                ..
            }
        ));
        assert_eq!(transmitter.state(), TransmitState::Failed(Phase::Payload));
    }

    #[test]
    fn test_cancel_during_first_settle() {
        let (mut sink, mut transmitter, log) = harness(None);
        let token = CancelToken::new();
        transmitter.settle.cancel_at = Some((1, token.clone()));
        let mut transmitter = transmitter.with_cancel(token);

        let err = transmitter.send(&mut sink, &command()).unwrap_err();
        assert!(matches!(err, PrintError::Cancelled { phase: Phase::Clear }));
        assert_eq!(transmitter.state(), TransmitState::Cancelled(Phase::Clear));
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn test_cancel_during_second_settle_skips_payload() {
        let (mut sink, mut transmitter, log) = harness(None);
        let token = CancelToken::new();
        transmitter.settle.cancel_at = Some((2, token.clone()));
        let mut transmitter = transmitter.with_cancel(token);

        let err = transmitter.send(&mut sink, &command()).unwrap_err();
        assert!(matches!(err, PrintError::Cancelled { phase: Phase::Initialize }));
        assert_eq!(transmitter.state(), TransmitState::Cancelled(Phase::Initialize));

        let settle = Duration::from_millis(20);
        assert_eq!(
            *log.borrow(),
            vec![
                Event::Write(vec![0x0A]),
                Event::Flush,
                Event::Settle(settle),
                Event::Write(vec![0x1B, 0x40, 0x1D, 0x76, 0x30, 0x00, 0x02, 0x00, 0x02, 0x00]),
                Event::Flush,
                Event::Settle(settle),
            ]
        );
    }

    #[test]
    fn test_cancel_before_start_writes_nothing() {
        let (mut sink, transmitter, log) = harness(None);
        let token = CancelToken::new();
        token.cancel();
        let mut transmitter = transmitter.with_cancel(token);

        assert!(transmitter.send(&mut sink, &command()).is_err());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_missing_device() {
        let (_sink, mut transmitter, log) = harness(None);
        let err = transmitter
            .transmit("/nonexistent/lpprint/lp0", &command())
            .unwrap_err();

        assert!(matches!(err, PrintError::DeviceNotFound(_)));
        assert_eq!(transmitter.state(), TransmitState::Failed(Phase::Open));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_transmit_to_regular_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let (_sink, mut transmitter, log) = harness(None);
        transmitter.transmit(file.path(), &command()).unwrap();

        let written = std::fs::read(file.path()).unwrap();
        let mut expected = vec![0x0A];
        expected.extend(command().to_bytes());
        assert_eq!(written, expected);
        // Both settle pauses still happen against a real file
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Initialize.to_string(), "initialize");
        assert_eq!(Phase::Open.to_string(), "device open");
    }
}
