//! GPIO and interrupt abstraction layer
//!
//! Models the host GPIO subsystem consumed by the board drivers: pin
//! configuration, level access, and a shared edge-triggered ISR service that
//! dispatches per-pin handlers.
//!
//! # Interrupt hand-off
//!
//! Handlers registered through [`HostGpio::add_isr_handler`] run in interrupt
//! context. They must not touch the I2C bus and must not allocate. The
//! intended pattern is to register an [`InterruptNotifier`] and let a worker
//! task await it:
//!
//! ```text
//! pin edge ──ISR──▶ InterruptNotifier::notify()
//!                          │ (single slot)
//!                          ▼
//!                  worker: notifier.wait().await; expander.read()
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Pin state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// High (logic 1)
    High,
    /// Low (logic 0)
    Low,
}

impl PinState {
    /// Returns `true` for [`PinState::High`].
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    /// Returns `true` for [`PinState::Low`].
    pub const fn is_low(self) -> bool {
        matches!(self, Self::Low)
    }
}

impl From<bool> for PinState {
    fn from(value: bool) -> Self {
        if value {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl From<PinState> for bool {
    fn from(value: PinState) -> Self {
        matches!(value, PinState::High)
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinDirection {
    /// Input only
    Input,
    /// Push-pull output
    Output,
}

/// Pull resistor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Floating (no pull resistor)
    None,
    /// Internal pull-up
    Up,
    /// Internal pull-down
    Down,
}

/// External interrupt configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptMode {
    /// Trigger on rising edge
    RisingEdge,
    /// Trigger on falling edge
    FallingEdge,
    /// Trigger on both edges
    BothEdges,
}

/// Complete configuration for one host pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// Input or output
    pub direction: PinDirection,
    /// Pull resistor
    pub pull: Pull,
    /// Edge trigger, `None` disables the interrupt
    pub interrupt: Option<InterruptMode>,
}

impl PinConfig {
    /// Push-pull output, no pulls, interrupt disabled.
    pub const fn output() -> Self {
        Self {
            direction: PinDirection::Output,
            pull: Pull::None,
            interrupt: None,
        }
    }

    /// Input with the given pull, interrupt disabled.
    pub const fn input(pull: Pull) -> Self {
        Self {
            direction: PinDirection::Input,
            pull,
            interrupt: None,
        }
    }

    /// Same configuration with edge triggering enabled.
    #[must_use]
    pub const fn with_interrupt(self, mode: InterruptMode) -> Self {
        Self {
            interrupt: Some(mode),
            ..self
        }
    }
}

/// Outcome of [`HostGpio::install_isr_service`].
///
/// The ISR service is shared by every driver in the process. A second driver
/// finding it already installed is the normal case, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IsrService {
    /// This call installed the service.
    Installed,
    /// The service was installed earlier.
    AlreadyInstalled,
}

/// Handler invoked by the host in interrupt context.
///
/// Implementations must be short, must not block, must not allocate, and
/// must not start I2C transactions.
pub trait IsrHandler: Sync {
    /// Called once per triggering edge.
    fn on_interrupt(&self);
}

impl<F: Fn() + Sync> IsrHandler for F {
    fn on_interrupt(&self) {
        self();
    }
}

/// Host GPIO subsystem.
///
/// Pins are addressed by their host GPIO number. The error type is whatever
/// the host HAL reports; drivers propagate it unchanged.
pub trait HostGpio {
    /// Error type
    type Error: core::fmt::Debug;

    /// Apply direction, pull and edge-trigger configuration to `pin`.
    fn configure(&mut self, pin: u8, config: PinConfig) -> Result<(), Self::Error>;

    /// Drive an output pin.
    fn set_level(&mut self, pin: u8, level: PinState) -> Result<(), Self::Error>;

    /// Sample a pin.
    fn level(&mut self, pin: u8) -> Result<PinState, Self::Error>;

    /// Install the shared per-pin ISR dispatch service.
    fn install_isr_service(&mut self) -> Result<IsrService, Self::Error>;

    /// Attach `handler` to `pin`. The pin must already be configured with an
    /// edge trigger.
    fn add_isr_handler(
        &mut self,
        pin: u8,
        handler: &'static dyn IsrHandler,
    ) -> Result<(), Self::Error>;

    /// Detach the handler from `pin`.
    fn remove_isr_handler(&mut self, pin: u8) -> Result<(), Self::Error>;

    /// Return `pin` to its reset configuration (input, pull-up, no interrupt).
    fn reset_pin(&mut self, pin: u8) -> Result<(), Self::Error>;
}

/// Single-slot interrupt notification.
///
/// `notify()` may be called from interrupt context; repeated notifications
/// before the worker wakes collapse into one. Register a `'static` notifier
/// directly as an [`IsrHandler`].
pub struct InterruptNotifier {
    signal: Signal<CriticalSectionRawMutex, ()>,
}

impl InterruptNotifier {
    /// Create an idle notifier. Usable in `static` items.
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Mark an event pending and wake the waiting worker, if any.
    pub fn notify(&self) {
        self.signal.signal(());
    }

    /// Wait until an event is pending, then consume it.
    pub async fn wait(&self) {
        self.signal.wait().await;
    }

    /// Consume a pending event without waiting.
    pub fn take_pending(&self) -> bool {
        self.signal.try_take().is_some()
    }

    /// Returns `true` if an event is pending. Does not consume it.
    pub fn is_pending(&self) -> bool {
        self.signal.signaled()
    }
}

impl Default for InterruptNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IsrHandler for InterruptNotifier {
    fn on_interrupt(&self) {
        self.notify();
    }
}

/// Pin group for efficient multi-pin operations
pub trait PinGroup {
    /// Error type
    type Error;

    /// Read all pins at once
    fn read(&mut self) -> Result<u32, Self::Error>;

    /// Write all pins at once
    fn write(&mut self, value: u32) -> Result<(), Self::Error>;

    /// Set specific pins high
    fn set_high(&mut self, mask: u32) -> Result<(), Self::Error>;

    /// Set specific pins low
    fn set_low(&mut self, mask: u32) -> Result<(), Self::Error>;
}
