//! Power monitoring abstraction
//!
//! Battery state as reported by a fuel gauge. Readings go over a shared bus,
//! so every query can fail.

/// Power state monitor
pub trait PowerMonitor {
    /// Error type
    type Error: core::fmt::Debug;

    /// Get battery voltage (mV)
    fn battery_voltage_mv(&mut self) -> Result<u16, Self::Error>;

    /// Get battery state of charge (0-100 %)
    fn battery_percentage(&mut self) -> Result<u8, Self::Error>;
}
