//! Simulated PCF8574 for host-side testing
//!
//! Implements `embedded_hal::i2c::I2c` as a bus with a single PCF8574 on it.
//! Transactions to any other address are not acknowledged, which is what a
//! probe of an unpopulated address sees on real hardware.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use platform::I2cAddress;

use super::pcf8574::registers::POWER_ON_STATE;

/// Number of written bytes kept for inspection.
pub const HISTORY_DEPTH: usize = 32;

/// Simulated PCF8574 behind an I2C bus.
///
/// Pins read back as `latch & !external_low`: a pin latched high is a weak
/// pull-up and reads low only if something outside pulls it down.
pub struct SimulatedPcf8574 {
    address: u8,
    latch: u8,
    external_low: u8,
    failing: bool,
    /// Completed one-byte reads
    pub read_count: usize,
    /// Completed one-byte writes
    pub write_count: usize,
    history: heapless::Deque<u8, HISTORY_DEPTH>,
}

impl SimulatedPcf8574 {
    /// Chip at `address` in its power-on state, nothing pulling pins low.
    pub fn new(address: I2cAddress) -> Self {
        Self {
            address: address.get(),
            latch: POWER_ON_STATE,
            external_low: 0,
            failing: false,
            read_count: 0,
            write_count: 0,
            history: heapless::Deque::new(),
        }
    }

    /// Address the chip answers on
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Current output latch
    pub fn latch(&self) -> u8 {
        self.latch
    }

    /// Electrical pin state as a read would return it
    pub fn pins(&self) -> u8 {
        self.latch & !self.external_low
    }

    /// Pull the pins in `mask` low from outside (button pressed)
    pub fn pull_low(&mut self, mask: u8) {
        self.external_low |= mask;
    }

    /// Stop pulling the pins in `mask` low
    pub fn release(&mut self, mask: u8) {
        self.external_low &= !mask;
    }

    /// Make every transaction to this chip fail
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Last byte written to the latch, if any
    pub fn last_written(&self) -> Option<u8> {
        self.history.back().copied()
    }

    /// Bytes written to the latch, oldest first (most recent
    /// [`HISTORY_DEPTH`] only)
    pub fn written(&self) -> impl Iterator<Item = u8> + '_ {
        self.history.iter().copied()
    }

    /// Total completed transfers in either direction
    pub fn transaction_count(&self) -> usize {
        self.read_count.saturating_add(self.write_count)
    }

    fn record(&mut self, byte: u8) {
        if self.history.is_full() {
            self.history.pop_front();
        }
        // Cannot fail: a slot was just freed if the deque was full.
        let _ = self.history.push_back(byte);
        self.latch = byte;
        self.write_count = self.write_count.saturating_add(1);
    }
}

impl ErrorType for SimulatedPcf8574 {
    type Error = ErrorKind;
}

impl I2c for SimulatedPcf8574 {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        if self.failing {
            return Err(ErrorKind::Other);
        }
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        self.record(byte);
                    }
                }
                Operation::Read(buf) => {
                    let pins = self.pins();
                    buf.fill(pins);
                    self.read_count = self.read_count.saturating_add(buf.len());
                }
            }
        }
        Ok(())
    }
}
