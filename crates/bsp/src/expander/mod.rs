//! I/O expander drivers
//!
//! - `pcf8574` - NXP/TI PCF8574 and PCF8574A 8-bit quasi-bidirectional expander
//! - `mock` - Simulated PCF8574 on an I2C bus for host tests

pub mod mock;
pub mod pcf8574;

pub use mock::SimulatedPcf8574;
pub use pcf8574::{
    Error, InterruptBinding, InterruptError, Pcf8574, ADDRESS_PCF8574, ADDRESS_PCF8574A,
    PIN_COUNT,
};
