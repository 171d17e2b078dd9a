//! Mock implementations for testing
//!
//! This module provides mock implementations of the platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use crate::config::GPIO_NUM_MAX;
use crate::*;

/// Errors reported by [`MockGpio`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockGpioError {
    /// Pin number outside `0..GPIO_NUM_MAX`
    InvalidPin(u8),
    /// Failure injected by the test
    Injected,
    /// No room left in the handler table
    HandlerTableFull,
}

#[derive(Debug, Clone, Copy)]
struct MockPin {
    config: Option<PinConfig>,
    level: PinState,
}

const PIN_RESET: MockPin = MockPin {
    config: None,
    level: PinState::High,
};

/// Mock host GPIO
///
/// Input pins float high until a test drives them with
/// [`set_input_level`](Self::set_input_level). Registered ISR handlers are
/// kept so a test can [`fire`](Self::fire) them.
pub struct MockGpio {
    pins: [MockPin; GPIO_NUM_MAX as usize],
    isr_service: bool,
    handlers: heapless::Vec<(u8, &'static dyn IsrHandler), 8>,
    fail_isr_install: bool,
    fail_add_handler: bool,
    fail_configure: Option<u8>,
    fail_reset: bool,
    resets: u32,
}

impl MockGpio {
    /// Create new mock GPIO with every pin unconfigured
    pub fn new() -> Self {
        Self {
            pins: [PIN_RESET; GPIO_NUM_MAX as usize],
            isr_service: false,
            handlers: heapless::Vec::new(),
            fail_isr_install: false,
            fail_add_handler: false,
            fail_configure: None,
            fail_reset: false,
            resets: 0,
        }
    }

    /// Pretend another driver already installed the ISR service
    #[must_use]
    pub fn with_isr_service_installed(mut self) -> Self {
        self.isr_service = true;
        self
    }

    /// Make `install_isr_service` fail
    pub fn fail_isr_install(&mut self, fail: bool) {
        self.fail_isr_install = fail;
    }

    /// Make `add_isr_handler` fail
    pub fn fail_add_handler(&mut self, fail: bool) {
        self.fail_add_handler = fail;
    }

    /// Make `configure` fail for `pin`
    pub fn fail_configure(&mut self, pin: Option<u8>) {
        self.fail_configure = pin;
    }

    /// Make `reset_pin` fail
    pub fn fail_reset(&mut self, fail: bool) {
        self.fail_reset = fail;
    }

    /// Drive an input pin from outside (button press, expander INT line)
    pub fn set_input_level(&mut self, pin: u8, level: PinState) {
        if let Some(p) = self.pins.get_mut(usize::from(pin)) {
            p.level = level;
        }
    }

    /// Last configuration applied to `pin`
    pub fn pin_config(&self, pin: u8) -> Option<PinConfig> {
        self.pins.get(usize::from(pin)).and_then(|p| p.config)
    }

    /// Current level of `pin`
    pub fn pin_level(&self, pin: u8) -> Option<PinState> {
        self.pins.get(usize::from(pin)).map(|p| p.level)
    }

    /// Returns `true` once the ISR service is installed
    pub fn isr_service_installed(&self) -> bool {
        self.isr_service
    }

    /// Returns `true` if a handler is attached to `pin`
    pub fn has_handler(&self, pin: u8) -> bool {
        self.handlers.iter().any(|(p, _)| *p == pin)
    }

    /// Number of `reset_pin` calls so far
    pub fn reset_count(&self) -> u32 {
        self.resets
    }

    /// Simulate an edge on `pin`: runs its handler if one is attached.
    /// Returns `true` if a handler ran.
    pub fn fire(&self, pin: u8) -> bool {
        match self.handlers.iter().find(|(p, _)| *p == pin) {
            Some((_, handler)) => {
                handler.on_interrupt();
                true
            }
            None => false,
        }
    }

    fn pin_mut(&mut self, pin: u8) -> Result<&mut MockPin, MockGpioError> {
        self.pins
            .get_mut(usize::from(pin))
            .ok_or(MockGpioError::InvalidPin(pin))
    }
}

impl Default for MockGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl HostGpio for MockGpio {
    type Error = MockGpioError;

    fn configure(&mut self, pin: u8, config: PinConfig) -> Result<(), Self::Error> {
        if self.fail_configure == Some(pin) {
            return Err(MockGpioError::Injected);
        }
        self.pin_mut(pin)?.config = Some(config);
        Ok(())
    }

    fn set_level(&mut self, pin: u8, level: PinState) -> Result<(), Self::Error> {
        self.pin_mut(pin)?.level = level;
        Ok(())
    }

    fn level(&mut self, pin: u8) -> Result<PinState, Self::Error> {
        Ok(self.pin_mut(pin)?.level)
    }

    fn install_isr_service(&mut self) -> Result<IsrService, Self::Error> {
        if self.fail_isr_install {
            return Err(MockGpioError::Injected);
        }
        if self.isr_service {
            Ok(IsrService::AlreadyInstalled)
        } else {
            self.isr_service = true;
            Ok(IsrService::Installed)
        }
    }

    fn add_isr_handler(
        &mut self,
        pin: u8,
        handler: &'static dyn IsrHandler,
    ) -> Result<(), Self::Error> {
        self.pin_mut(pin)?;
        if self.fail_add_handler {
            return Err(MockGpioError::Injected);
        }
        self.handlers.retain(|(p, _)| *p != pin);
        self.handlers
            .push((pin, handler))
            .map_err(|_| MockGpioError::HandlerTableFull)
    }

    fn remove_isr_handler(&mut self, pin: u8) -> Result<(), Self::Error> {
        self.pin_mut(pin)?;
        self.handlers.retain(|(p, _)| *p != pin);
        Ok(())
    }

    fn reset_pin(&mut self, pin: u8) -> Result<(), Self::Error> {
        if self.fail_reset {
            return Err(MockGpioError::Injected);
        }
        *self.pin_mut(pin)? = MockPin {
            config: Some(PinConfig::input(Pull::Up)),
            level: PinState::High,
        };
        self.resets = self.resets.saturating_add(1);
        Ok(())
    }
}

/// Mock LED strip
///
/// Keeps the frame buffer and the last frame pushed with `refresh`.
pub struct MockLedStrip<const N: usize> {
    frame: [Rgb; N],
    shown: [Rgb; N],
    refresh_count: usize,
    clear_count: usize,
    fail: bool,
}

/// Error reported by [`MockLedStrip`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockLedError {
    /// Pixel index past the end of the strip
    OutOfBounds(usize),
    /// Failure injected by the test
    Injected,
}

impl<const N: usize> MockLedStrip<N> {
    /// Create new mock strip with all pixels off
    pub fn new() -> Self {
        Self {
            frame: [Rgb::OFF; N],
            shown: [Rgb::OFF; N],
            refresh_count: 0,
            clear_count: 0,
            fail: false,
        }
    }

    /// Make every operation fail
    pub fn fail(&mut self, fail: bool) {
        self.fail = fail;
    }

    /// Pixels as last pushed to the strip
    pub fn shown(&self) -> &[Rgb] {
        &self.shown
    }

    /// Get refresh count
    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }

    /// Get clear count
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    fn check(&self) -> Result<(), MockLedError> {
        if self.fail {
            Err(MockLedError::Injected)
        } else {
            Ok(())
        }
    }
}

impl<const N: usize> Default for MockLedStrip<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LedStrip for MockLedStrip<N> {
    type Error = MockLedError;

    fn len(&self) -> usize {
        N
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error> {
        self.check()?;
        let pixel = self
            .frame
            .get_mut(index)
            .ok_or(MockLedError::OutOfBounds(index))?;
        *pixel = color;
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        self.shown = self.frame;
        self.refresh_count = self.refresh_count.saturating_add(1);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        self.frame = [Rgb::OFF; N];
        self.shown = [Rgb::OFF; N];
        self.clear_count = self.clear_count.saturating_add(1);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    static FIRED: AtomicUsize = AtomicUsize::new(0);

    fn count_edge() {
        FIRED.fetch_add(1, Ordering::Relaxed);
    }

    static COUNT_EDGE: fn() = count_edge;

    #[test]
    fn test_mock_gpio_levels() {
        let mut gpio = MockGpio::new();
        gpio.configure(4, PinConfig::output()).unwrap();
        gpio.set_level(4, PinState::Low).unwrap();
        assert_eq!(gpio.level(4).unwrap(), PinState::Low);
        assert_eq!(gpio.pin_config(4), Some(PinConfig::output()));
        assert_eq!(
            gpio.set_level(GPIO_NUM_MAX, PinState::High),
            Err(MockGpioError::InvalidPin(GPIO_NUM_MAX))
        );
    }

    #[test]
    fn test_mock_gpio_isr_service_installs_once() {
        let mut gpio = MockGpio::new();
        assert_eq!(gpio.install_isr_service().unwrap(), IsrService::Installed);
        assert_eq!(
            gpio.install_isr_service().unwrap(),
            IsrService::AlreadyInstalled
        );
    }

    #[test]
    fn test_mock_gpio_fire_runs_handler() {
        let mut gpio = MockGpio::new();
        gpio.add_isr_handler(7, &COUNT_EDGE).unwrap();
        assert!(gpio.fire(7));
        assert!(!gpio.fire(8));
        assert_eq!(FIRED.load(Ordering::Relaxed), 1);

        gpio.remove_isr_handler(7).unwrap();
        assert!(!gpio.has_handler(7));
        assert!(!gpio.fire(7));
    }

    #[test]
    fn test_mock_led_strip() {
        let mut strip = MockLedStrip::<3>::new();
        strip.set_pixel(1, Rgb::new(10, 20, 30)).unwrap();
        assert_eq!(strip.shown()[1], Rgb::OFF);
        strip.refresh().unwrap();
        assert_eq!(strip.shown()[1], Rgb::new(10, 20, 30));
        assert_eq!(strip.set_pixel(3, Rgb::OFF), Err(MockLedError::OutOfBounds(3)));

        strip.clear().unwrap();
        assert!(strip.shown().iter().all(|p| *p == Rgb::OFF));
        assert_eq!(strip.clear_count(), 1);
    }

    #[test]
    fn test_mock_gpio_reset_pin_returns_to_pulled_up_input() {
        let mut gpio = MockGpio::new();
        gpio.configure(3, PinConfig::output()).unwrap();
        gpio.set_level(3, PinState::Low).unwrap();

        gpio.reset_pin(3).unwrap();

        assert_eq!(gpio.pin_config(3), Some(PinConfig::input(Pull::Up)));
        assert_eq!(gpio.pin_level(3), Some(PinState::High));
        assert_eq!(gpio.reset_count(), 1);
    }

    #[test]
    fn test_mock_gpio_fail_reset_leaves_pin_alone() {
        let mut gpio = MockGpio::new();
        gpio.configure(3, PinConfig::output()).unwrap();
        gpio.fail_reset(true);

        assert_eq!(gpio.reset_pin(3), Err(MockGpioError::Injected));
        assert_eq!(gpio.pin_config(3), Some(PinConfig::output()));
        assert_eq!(gpio.reset_count(), 0);
    }

    #[test]
    fn test_mock_gpio_preinstalled_isr_service() {
        let mut gpio = MockGpio::new().with_isr_service_installed();
        assert_eq!(
            gpio.install_isr_service().unwrap(),
            IsrService::AlreadyInstalled
        );
    }

    #[tokio::test]
    async fn test_mock_gpio_edge_wakes_notifier() {
        static NOTIFIER: InterruptNotifier = InterruptNotifier::new();
        let mut gpio = MockGpio::new();
        gpio.configure(
            10,
            PinConfig::input(Pull::Up).with_interrupt(InterruptMode::FallingEdge),
        )
        .unwrap();
        gpio.add_isr_handler(10, &NOTIFIER).unwrap();

        assert!(gpio.fire(10));
        NOTIFIER.wait().await;
        assert!(!NOTIFIER.take_pending());
    }
}
