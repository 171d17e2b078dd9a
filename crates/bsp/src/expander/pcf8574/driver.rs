//! PCF8574 driver over a blocking I2C handle.

use embedded_hal::i2c::I2c;
use platform::{
    HostGpio, I2cAddress, InterruptMode, InterruptNotifier, IsrHandler, IsrService, PinConfig,
    PinGroup, PinState, Pull,
};

use super::registers::{effective_byte, pin_mask, POWER_ON_STATE};
use super::{Error, InterruptError};

/// Host pin the expander INT line is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptBinding {
    /// Host GPIO number
    pub host_pin: u8,
}

/// PCF8574 I/O expander.
///
/// Owns its I2C handle. On a shared bus pass an
/// `embedded_hal_bus::i2c::RefCellDevice` (or any other bus-sharing device).
///
/// Dropping a device with a registered interrupt leaves the host handler
/// installed. Use [`Pcf8574::delete`] to tear it down.
pub struct Pcf8574<I> {
    i2c: I,
    address: I2cAddress,
    output: u8,
    direction: u8,
    interrupt: Option<InterruptBinding>,
}

impl<I: I2c> Pcf8574<I> {
    /// Bind to the expander at `address`. No bus traffic.
    ///
    /// Output cache and direction mask start at 0xFF, matching the chip's
    /// power-on state. Call [`probe`](Self::probe) to check the chip answers.
    pub fn new(i2c: I, address: I2cAddress) -> Self {
        #[cfg(feature = "defmt")]
        defmt::debug!("PCF8574 bound at {=u8:#x}", address.get());

        Self {
            i2c,
            address,
            output: POWER_ON_STATE,
            direction: POWER_ON_STATE,
            interrupt: None,
        }
    }

    /// Device address
    pub fn address(&self) -> I2cAddress {
        self.address
    }

    /// One read to confirm the chip acknowledges its address.
    pub fn probe(&mut self) -> Result<u8, Error<I::Error>> {
        self.read()
    }

    /// Tear down the device held in `slot`.
    ///
    /// Does nothing and returns `None` if the slot is empty. Otherwise empties
    /// the slot, unregisters the interrupt if one is registered, and returns
    /// the I2C handle. Unregister failures are logged, not reported.
    pub fn delete<G: HostGpio>(slot: &mut Option<Self>, gpio: &mut G) -> Option<I> {
        let mut dev = slot.take()?;
        if dev.interrupt.is_some() {
            if let Err(_e) = dev.unregister_interrupt(gpio) {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "PCF8574 {=u8:#x}: interrupt teardown failed: {}",
                    dev.address.get(),
                    defmt::Debug2Format(&_e)
                );
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("PCF8574 {=u8:#x} deleted", dev.address.get());

        Some(dev.i2c)
    }

    /// Sample all eight pins.
    ///
    /// Returns the electrical state, not the cache: an output latched high
    /// but pulled low externally reads 0.
    pub fn read(&mut self) -> Result<u8, Error<I::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .read(self.address.get(), &mut buf)
            .map_err(Error::Transport)?;
        let [value] = buf;
        Ok(value)
    }

    /// Replace the output cache with `value` and transmit it.
    ///
    /// Pins marked as inputs are still sent high.
    pub fn write(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.output = value;
        self.flush()
    }

    /// Transmit `output_cache | direction_mask`.
    pub fn flush(&mut self) -> Result<(), Error<I::Error>> {
        let byte = effective_byte(self.output, self.direction);
        self.i2c
            .write(self.address.get(), &[byte])
            .map_err(Error::Transport)
    }

    /// Intended output state. Local, no bus traffic.
    pub fn output_cache(&self) -> u8 {
        self.output
    }

    /// Mark pins as inputs (bit set) or outputs (bit clear) and transmit.
    ///
    /// A pin switched to input goes high immediately. A pin switched to
    /// output takes its cached level.
    pub fn set_direction(&mut self, input_mask: u8) -> Result<(), Error<I::Error>> {
        self.direction = input_mask;
        self.flush()
    }

    /// Current direction mask, 1 = input. Local, no bus traffic.
    pub fn direction(&self) -> u8 {
        self.direction
    }

    /// Drive pin `pin` high.
    pub fn set_pin(&mut self, pin: u8) -> Result<(), Error<I::Error>> {
        let mask = pin_mask(pin).ok_or(Error::InvalidPin(pin))?;
        self.output |= mask;
        self.flush()
    }

    /// Drive pin `pin` low.
    pub fn clear_pin(&mut self, pin: u8) -> Result<(), Error<I::Error>> {
        let mask = pin_mask(pin).ok_or(Error::InvalidPin(pin))?;
        self.output &= !mask;
        self.flush()
    }

    /// Invert the cached level of pin `pin` and transmit.
    pub fn toggle_pin(&mut self, pin: u8) -> Result<(), Error<I::Error>> {
        let mask = pin_mask(pin).ok_or(Error::InvalidPin(pin))?;
        self.output ^= mask;
        self.flush()
    }

    /// Sample one pin. Reads the whole port.
    pub fn read_pin(&mut self, pin: u8) -> Result<PinState, Error<I::Error>> {
        let mask = pin_mask(pin).ok_or(Error::InvalidPin(pin))?;
        let value = self.read()?;
        Ok(PinState::from(value & mask != 0))
    }

    /// Attach `handler` to the host pin wired to the expander INT line.
    ///
    /// Installs the shared ISR service (finding it already installed is
    /// fine), configures `host_pin` as a pulled-up falling-edge input and
    /// adds the handler. If the handler cannot be added the pin is reset and
    /// the device stays unregistered.
    ///
    /// `handler` runs in interrupt context. It must not call back into this
    /// driver; register an [`InterruptNotifier`] and read from a worker.
    pub fn register_interrupt<G: HostGpio>(
        &mut self,
        gpio: &mut G,
        host_pin: u8,
        handler: &'static dyn IsrHandler,
    ) -> Result<(), InterruptError<G::Error>> {
        if self.interrupt.is_some() {
            return Err(InterruptError::AlreadyRegistered);
        }

        // AlreadyInstalled is the normal case when another driver got there first.
        let _service: IsrService = gpio.install_isr_service().map_err(InterruptError::Gpio)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("GPIO ISR service: {}", _service);

        gpio.configure(
            host_pin,
            PinConfig::input(Pull::Up).with_interrupt(InterruptMode::FallingEdge),
        )
        .map_err(InterruptError::Gpio)?;

        if let Err(e) = gpio.add_isr_handler(host_pin, handler) {
            if let Err(_reset) = gpio.reset_pin(host_pin) {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "GPIO{}: reset after failed handler install also failed: {}",
                    host_pin,
                    defmt::Debug2Format(&_reset)
                );
            }
            return Err(InterruptError::Gpio(e));
        }

        self.interrupt = Some(InterruptBinding { host_pin });

        #[cfg(feature = "defmt")]
        defmt::info!(
            "PCF8574 {=u8:#x}: INT on GPIO{}",
            self.address.get(),
            host_pin
        );

        Ok(())
    }

    /// Remove the handler, reset the host pin and forget the binding.
    ///
    /// The binding is forgotten as soon as the handler is gone. A failing
    /// pin reset is still reported, but the device is then Unregistered.
    pub fn unregister_interrupt<G: HostGpio>(
        &mut self,
        gpio: &mut G,
    ) -> Result<(), InterruptError<G::Error>> {
        let binding = self.interrupt.ok_or(InterruptError::NotRegistered)?;
        gpio.remove_isr_handler(binding.host_pin)
            .map_err(InterruptError::Gpio)?;
        self.interrupt = None;
        gpio.reset_pin(binding.host_pin)
            .map_err(InterruptError::Gpio)?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "PCF8574 {=u8:#x}: INT released from GPIO{}",
            self.address.get(),
            binding.host_pin
        );

        Ok(())
    }

    /// Host pin of the registered interrupt, if any.
    pub fn interrupt_pin(&self) -> Option<u8> {
        self.interrupt.map(|b| b.host_pin)
    }

    /// Wait for the INT line to fire, then sample the port.
    ///
    /// `notifier` must be the handler passed to
    /// [`register_interrupt`](Self::register_interrupt).
    pub async fn wait_for_change(
        &mut self,
        notifier: &InterruptNotifier,
    ) -> Result<u8, Error<I::Error>> {
        notifier.wait().await;
        self.read()
    }
}

impl<I: I2c> PinGroup for Pcf8574<I> {
    type Error = Error<I::Error>;

    fn read(&mut self) -> Result<u32, Self::Error> {
        Pcf8574::read(self).map(u32::from)
    }

    /// Only the low byte is used; bits 8..32 are ignored.
    fn write(&mut self, value: u32) -> Result<(), Self::Error> {
        Pcf8574::write(self, port_byte(value))
    }

    fn set_high(&mut self, mask: u32) -> Result<(), Self::Error> {
        self.output |= port_byte(mask);
        self.flush()
    }

    fn set_low(&mut self, mask: u32) -> Result<(), Self::Error> {
        self.output &= !port_byte(mask);
        self.flush()
    }
}

/// P0..P7 part of a 32-bit group value.
fn port_byte(value: u32) -> u8 {
    let [low, ..] = value.to_le_bytes();
    low
}
