//! PCF8574 / PCF8574A 8-bit I2C I/O expander (NXP, TI)
//!
//! Eight quasi-bidirectional pins behind a single-byte latch. There is no
//! direction register in silicon: a pin driven high is a weak pull-up and
//! doubles as an input, a pin driven low sinks current.
//!
//! # Host-side model
//!
//! ```text
//! output_cache   last byte the application asked for (intended state)
//! direction_mask 1 = input, forced high on the wire
//! wire byte      output_cache | direction_mask
//! ```
//!
//! Both start at 0xFF, the chip's power-on state. The cache is updated
//! before the transport write and is not rolled back on failure;
//! [`Pcf8574::flush`] retransmits it.
//!
//! # INT line
//!
//! Open drain, active low, asserted on any input change until the next
//! read. [`Pcf8574::register_interrupt`] configures the host pin as a
//! pulled-up falling-edge input.
//!
//! ```text
//! P1 change ──▶ INT low ──▶ host ISR ──▶ InterruptNotifier::notify()
//!                                              │
//!                       worker: expander.wait_for_change(&notifier)
//! ```

mod driver;
pub mod registers;

pub use driver::{InterruptBinding, Pcf8574};
pub use registers::{ADDRESS_PCF8574, ADDRESS_PCF8574A, PIN_COUNT};

/// Expander I/O error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Pin number outside P0..P7
    InvalidPin(u8),
    /// I2C transaction failed
    Transport(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidPin(pin) => write!(f, "invalid expander pin P{pin} (P0..P7)"),
            Self::Transport(e) => write!(f, "I2C transport error: {e:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Error<E> {}

/// Interrupt registration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptError<E> {
    /// A handler is already registered for this device
    AlreadyRegistered,
    /// No handler is registered for this device
    NotRegistered,
    /// Host GPIO or ISR service failure
    Gpio(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for InterruptError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AlreadyRegistered => write!(f, "expander interrupt already registered"),
            Self::NotRegistered => write!(f, "expander interrupt not registered"),
            Self::Gpio(e) => write!(f, "host GPIO error: {e:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for InterruptError<E> {}
