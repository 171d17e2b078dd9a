//! Board context
//!
//! [`Bsp`] owns every board-level handle: host GPIO, the shared I2C bus
//! (borrowed), the RGB strip, the fuel gauge and the I/O expander. The
//! application creates one and passes it where it is needed.
//!
//! ```text
//! let bus = RefCell::new(i2c);
//! let mut bsp = Bsp::new(BoardConfig::default(), &bus, gpio);
//! bsp.init()?;                 // status LED, buttons, fuel gauge, expander
//! bsp.init_led_rgb(strip)?;
//! ```

mod config;

pub use config::{BoardConfig, ButtonConfig, LedRgbConfig};

use core::cell::RefCell;

use embedded_hal::i2c::I2c;
use embedded_hal_bus::i2c::RefCellDevice;
use platform::config::{BUTTON_COUNT, GPIO_NUM_MAX};
use platform::{
    ActiveLevel, ButtonId, HostGpio, IsrHandler, LedStrip, Max17048, PinConfig, PinState,
    PowerMonitor, Pull,
};

use crate::error::BspError;
use crate::expander::Pcf8574;

/// A configured button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Button {
    /// Which button
    pub id: ButtonId,
    /// Host GPIO
    pub gpio: u8,
    /// Level that means pressed
    pub active_level: ActiveLevel,
}

/// Expander on the shared bus
pub type BoardExpander<'bus, B> = Pcf8574<RefCellDevice<'bus, B>>;

/// Fuel gauge on the shared bus
pub type BoardFuelGauge<'bus, B> = Max17048<RefCellDevice<'bus, B>>;

/// Board support context
pub struct Bsp<'bus, B, G, S> {
    config: BoardConfig,
    bus: &'bus RefCell<B>,
    gpio: G,
    led_rgb: Option<S>,
    fuel_gauge: Option<BoardFuelGauge<'bus, B>>,
    expander: Option<BoardExpander<'bus, B>>,
    buttons: [Option<Button>; BUTTON_COUNT],
    status_led: bool,
}

impl<'bus, B, G, S> Bsp<'bus, B, G, S>
where
    B: I2c,
    G: HostGpio,
    S: LedStrip,
{
    /// Create the context. Touches no hardware.
    pub fn new(config: BoardConfig, bus: &'bus RefCell<B>, gpio: G) -> Self {
        Self {
            config,
            bus,
            gpio,
            led_rgb: None,
            fuel_gauge: None,
            expander: None,
            buttons: [None; BUTTON_COUNT],
            status_led: false,
        }
    }

    /// Board wiring
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Host GPIO
    pub fn gpio(&mut self) -> &mut G {
        &mut self.gpio
    }

    /// Bring up the status LED, buttons, fuel gauge and expander, in that
    /// order.
    ///
    /// A failing step is logged and the remaining steps still run. Returns
    /// the first error.
    pub fn init(&mut self) -> Result<(), BspError> {
        #[cfg(feature = "defmt")]
        defmt::info!("Initializing HOPE badge BSP");

        let mut first = None;
        record("status LED", self.init_status_led(), &mut first);
        record("buttons", self.buttons_init(), &mut first);
        record("fuel gauge", self.fuel_gauge_init(), &mut first);
        record("expander", self.expander_init(), &mut first);

        #[cfg(feature = "defmt")]
        defmt::info!("BSP initialization complete");

        first.map_or(Ok(()), Err)
    }

    /// Release the expander (unregistering its interrupt) and the fuel
    /// gauge. Safe to call more than once.
    pub fn deinit(&mut self) {
        // The RefCellDevice handed back is just a bus borrow.
        let _ = Pcf8574::delete(&mut self.expander, &mut self.gpio);
        self.fuel_gauge = None;

        #[cfg(feature = "defmt")]
        defmt::info!("BSP deinitialized");
    }

    // ── GPIO ────────────────────────────────────────────────────────────────

    /// Drive a host GPIO.
    pub fn gpio_set_level(&mut self, pin: u8, level: PinState) -> Result<(), BspError> {
        check_gpio(pin)?;
        self.gpio.set_level(pin, level).map_err(|_e| {
            #[cfg(feature = "defmt")]
            defmt::error!("GPIO{}: set level failed: {}", pin, defmt::Debug2Format(&_e));
            BspError::Gpio
        })
    }

    /// Sample a host GPIO.
    pub fn gpio_get_level(&mut self, pin: u8) -> Result<PinState, BspError> {
        check_gpio(pin)?;
        self.gpio.level(pin).map_err(|_| BspError::Gpio)
    }

    // ── Status LED ──────────────────────────────────────────────────────────

    /// Configure the status LED as an output and switch it off.
    pub fn init_status_led(&mut self) -> Result<(), BspError> {
        let pin = self.config.status_led_gpio;
        check_gpio(pin)?;
        self.gpio
            .configure(pin, PinConfig::output())
            .map_err(|_| BspError::Gpio)?;
        self.gpio
            .set_level(pin, PinState::Low)
            .map_err(|_| BspError::Gpio)?;
        self.status_led = true;
        Ok(())
    }

    /// Switch the status LED.
    pub fn set_status_led(&mut self, on: bool) -> Result<(), BspError> {
        if !self.status_led {
            return Err(BspError::NotInitialized);
        }
        self.gpio_set_level(self.config.status_led_gpio, PinState::from(on))
    }

    // ── Buttons ─────────────────────────────────────────────────────────────

    /// Configure every enabled button as an input, pulled to its idle level.
    ///
    /// A button that fails to configure is left out; the rest are still set
    /// up. Returns the first error.
    pub fn buttons_init(&mut self) -> Result<(), BspError> {
        let mut first = None;
        for (slot, (cfg, id)) in self
            .buttons
            .iter_mut()
            .zip(self.config.buttons.iter().zip(ButtonId::ALL))
        {
            *slot = None;
            if !cfg.enabled {
                continue;
            }
            let pull = match cfg.active_level {
                ActiveLevel::Low => Pull::Up,
                ActiveLevel::High => Pull::Down,
            };
            let result = check_gpio(cfg.gpio).and_then(|()| {
                self.gpio
                    .configure(cfg.gpio, PinConfig::input(pull))
                    .map_err(|_| BspError::Gpio)
            });
            match result {
                Ok(()) => {
                    *slot = Some(Button {
                        id,
                        gpio: cfg.gpio,
                        active_level: cfg.active_level,
                    });
                }
                Err(e) => {
                    #[cfg(feature = "defmt")]
                    defmt::error!("button {} on GPIO{}: {}", id, cfg.gpio, e);
                    first.get_or_insert(e);
                }
            }
        }
        first.map_or(Ok(()), Err)
    }

    /// Configured button at board index `index`
    pub fn button(&self, index: usize) -> Option<&Button> {
        self.buttons.get(index).and_then(Option::as_ref)
    }

    /// Raw (not debounced) pressed state of the button at `index`.
    pub fn button_pressed(&mut self, index: usize) -> Result<bool, BspError> {
        let button = *self.button(index).ok_or(BspError::InvalidButton(index))?;
        let level = self.gpio_get_level(button.gpio)?;
        Ok(button.active_level.is_active(level))
    }

    // ── RGB strip ───────────────────────────────────────────────────────────

    /// Take ownership of the RGB strip and switch every pixel off.
    ///
    /// The strip is only kept if clearing it succeeds.
    pub fn init_led_rgb(&mut self, mut strip: S) -> Result<(), BspError> {
        strip.clear().map_err(|_| BspError::LedStrip)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "RGB strip on GPIO{}: {} pixels",
            self.config.led_rgb.gpio,
            strip.len()
        );

        self.led_rgb = Some(strip);
        Ok(())
    }

    /// RGB strip, if initialized
    pub fn led_rgb(&mut self) -> Option<&mut S> {
        self.led_rgb.as_mut()
    }

    // ── Fuel gauge ──────────────────────────────────────────────────────────

    /// Bind the MAX17048 and check it answers.
    pub fn fuel_gauge_init(&mut self) -> Result<(), BspError> {
        let mut gauge = Max17048::new(RefCellDevice::new(self.bus));
        let _version = gauge.version().map_err(|e| BspError::from_i2c(&e))?;

        #[cfg(feature = "defmt")]
        defmt::info!("MAX17048 version {=u16:#x}", _version);

        self.fuel_gauge = Some(gauge);
        Ok(())
    }

    /// Battery voltage in millivolts.
    pub fn battery_voltage_mv(&mut self) -> Result<u16, BspError> {
        let gauge = self.fuel_gauge.as_mut().ok_or(BspError::NotInitialized)?;
        gauge
            .battery_voltage_mv()
            .map_err(|e| BspError::from_i2c(&e))
    }

    /// Battery state of charge in percent.
    pub fn battery_percentage(&mut self) -> Result<u8, BspError> {
        let gauge = self.fuel_gauge.as_mut().ok_or(BspError::NotInitialized)?;
        gauge
            .battery_percentage()
            .map_err(|e| BspError::from_i2c(&e))
    }

    // ── Expander ────────────────────────────────────────────────────────────

    /// Find the expander: try each configured address in turn and keep the
    /// first one that answers a read.
    ///
    /// Does nothing if the expander is already up.
    pub fn expander_init(&mut self) -> Result<(), BspError> {
        if self.expander.is_some() {
            return Ok(());
        }
        for address in self.config.expander_addresses {
            let mut slot = Some(Pcf8574::new(RefCellDevice::new(self.bus), address));
            let probed = slot.as_mut().map(Pcf8574::probe);
            if let Some(Ok(_state)) = probed {
                #[cfg(feature = "defmt")]
                defmt::info!(
                    "PCF8574 found at {=u8:#x}, pins {=u8:#x}",
                    address.get(),
                    _state
                );
                self.expander = slot;
                return Ok(());
            }

            #[cfg(feature = "defmt")]
            defmt::warn!("no PCF8574 at {=u8:#x}", address.get());
            let _ = Pcf8574::delete(&mut slot, &mut self.gpio);
        }

        #[cfg(feature = "defmt")]
        defmt::error!("no I/O expander found");
        Err(BspError::NoExpander)
    }

    /// Expander, if found
    pub fn expander(&mut self) -> Option<&mut BoardExpander<'bus, B>> {
        self.expander.as_mut()
    }

    /// Sample all expander pins.
    pub fn expander_read_ios(&mut self) -> Result<u8, BspError> {
        let expander = self.expander.as_mut().ok_or(BspError::NotInitialized)?;
        Ok(expander.read()?)
    }

    /// Attach `handler` to the expander INT line on the configured host pin.
    pub fn expander_register_interrupt(
        &mut self,
        handler: &'static dyn IsrHandler,
    ) -> Result<(), BspError> {
        let pin = self
            .config
            .expander_int_gpio
            .ok_or(BspError::NotInitialized)?;
        check_gpio(pin)?;
        let expander = self.expander.as_mut().ok_or(BspError::NotInitialized)?;
        expander.register_interrupt(&mut self.gpio, pin, handler)?;
        Ok(())
    }

    /// Detach the expander INT handler.
    pub fn expander_unregister_interrupt(&mut self) -> Result<(), BspError> {
        let expander = self.expander.as_mut().ok_or(BspError::NotInitialized)?;
        expander.unregister_interrupt(&mut self.gpio)?;
        Ok(())
    }
}

fn check_gpio(pin: u8) -> Result<(), BspError> {
    if pin < GPIO_NUM_MAX {
        Ok(())
    } else {
        #[cfg(feature = "defmt")]
        defmt::error!("invalid GPIO number: {}", pin);
        Err(BspError::InvalidGpio(pin))
    }
}

fn record(_step: &str, result: Result<(), BspError>, first: &mut Option<BspError>) {
    if let Err(e) = result {
        #[cfg(feature = "defmt")]
        defmt::error!("{=str} init failed: {}", _step, e);
        first.get_or_insert(e);
    }
}
