//! Mock motor pin for host-side testing
//!
//! [`MockMotorPin`] is a handle onto a shared [`MotorLog`], so the test
//! keeps reading the log while the driver owns the pin.

use core::cell::RefCell;

use embassy_time::Instant;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use platform::PinState;

/// Number of pin writes kept in the log.
pub const LOG_DEPTH: usize = 64;

/// One pin write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Level written
    pub level: PinState,
    /// When it was written
    pub at: Instant,
}

/// Record of everything written to a [`MockMotorPin`].
pub struct MotorLog {
    /// Current pin level
    pub level: PinState,
    /// Pin writes, oldest first (first [`LOG_DEPTH`] only)
    pub edges: heapless::Vec<Edge, LOG_DEPTH>,
    /// Make every pin write fail
    pub fail: bool,
}

impl MotorLog {
    /// Empty log, pin low
    pub fn new() -> Self {
        Self {
            level: PinState::Low,
            edges: heapless::Vec::new(),
            fail: false,
        }
    }

    /// Number of writes that drove the pin high
    pub fn high_count(&self) -> usize {
        self.edges
            .iter()
            .filter(|e| e.level == PinState::High)
            .count()
    }

    fn write(&mut self, level: PinState) -> Result<(), MockPinError> {
        if self.fail {
            return Err(MockPinError);
        }
        self.level = level;
        // Log is bounded; later writes only update `level`.
        let _ = self.edges.push(Edge {
            level,
            at: Instant::now(),
        });
        Ok(())
    }
}

impl Default for MotorLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Injected pin failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Mock motor output pin
pub struct MockMotorPin<'a> {
    log: &'a RefCell<MotorLog>,
}

impl<'a> MockMotorPin<'a> {
    /// Create a pin that records into `log`
    pub fn new(log: &'a RefCell<MotorLog>) -> Self {
        Self { log }
    }
}

impl ErrorType for MockMotorPin<'_> {
    type Error = MockPinError;
}

impl OutputPin for MockMotorPin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().write(PinState::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().write(PinState::High)
    }
}
