//! PCF8574 driver behaviour against a simulated chip.
//!
//! Covers the cache and direction rules over the whole byte range, the
//! probe fallback between the two address families, and the interrupt
//! lifecycle on the mock host GPIO.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use core::cell::RefCell;

use bsp::expander::{Error, InterruptError, Pcf8574, SimulatedPcf8574, PIN_COUNT};
use embedded_hal::i2c::ErrorKind;
use embedded_hal_bus::i2c::RefCellDevice;
use platform::mocks::MockGpio;
use platform::{I2cAddress, InterruptNotifier, PinState};
use proptest::prelude::*;

fn chip() -> Pcf8574<SimulatedPcf8574> {
    Pcf8574::new(SimulatedPcf8574::new(I2cAddress::PCF8574), I2cAddress::PCF8574)
}

proptest! {
    #[test]
    fn fresh_device_reads_every_pin_high(pin in 0u8..PIN_COUNT) {
        let mut dev = chip();
        prop_assert_eq!(dev.read_pin(pin).unwrap(), PinState::High);
    }

    #[test]
    fn pins_past_p7_are_rejected_without_traffic(pin in PIN_COUNT..=u8::MAX) {
        let mut dev = chip();
        prop_assert_eq!(dev.set_pin(pin), Err(Error::InvalidPin(pin)));
        prop_assert_eq!(dev.read_pin(pin), Err(Error::InvalidPin(pin)));
        let sim = dev.into_bus();
        prop_assert_eq!(sim.transaction_count(), 0);
    }

    #[test]
    fn write_transmits_value_or_direction(direction in any::<u8>(), value in any::<u8>()) {
        let mut dev = chip();
        dev.set_direction(direction).unwrap();
        dev.write(value).unwrap();
        prop_assert_eq!(dev.output_cache(), value);
        let sim = dev.into_bus();
        prop_assert_eq!(sim.last_written(), Some(value | direction));
    }

    #[test]
    fn direction_change_keeps_cached_outputs(cache in any::<u8>(), mask in any::<u8>()) {
        let bus = RefCell::new(SimulatedPcf8574::new(I2cAddress::PCF8574));
        let mut dev = Pcf8574::new(RefCellDevice::new(&bus), I2cAddress::PCF8574);
        dev.set_direction(0x00).unwrap();
        dev.write(cache).unwrap();

        dev.set_direction(mask).unwrap();
        prop_assert_eq!(bus.borrow().last_written(), Some(cache | mask));
        prop_assert_eq!(dev.output_cache(), cache);

        // Back to all outputs: the cached levels come back on the wire.
        dev.set_direction(0x00).unwrap();
        prop_assert_eq!(bus.borrow().last_written(), Some(cache));
    }

    #[test]
    fn input_pins_always_latch_high(direction in any::<u8>(), ops in prop::collection::vec((0u8..PIN_COUNT, 0u8..3), 0..24)) {
        let mut dev = chip();
        dev.set_direction(direction).unwrap();
        for (pin, op) in ops {
            match op {
                0 => dev.set_pin(pin).unwrap(),
                1 => dev.clear_pin(pin).unwrap(),
                _ => dev.toggle_pin(pin).unwrap(),
            }
        }
        let sim = dev.into_bus();
        for byte in sim.written() {
            prop_assert_eq!(byte & direction, direction);
        }
    }

    #[test]
    fn clear_then_read_is_low_on_outputs(pin in 0u8..PIN_COUNT) {
        let mut dev = chip();
        dev.set_direction(0x00).unwrap();
        dev.set_pin(pin).unwrap();
        dev.clear_pin(pin).unwrap();
        prop_assert_eq!(dev.read_pin(pin).unwrap(), PinState::Low);
        dev.set_pin(pin).unwrap();
        prop_assert_eq!(dev.read_pin(pin).unwrap(), PinState::High);
    }

    #[test]
    fn toggle_twice_restores_cache(start in any::<u8>(), pin in 0u8..PIN_COUNT) {
        let mut dev = chip();
        dev.set_direction(0x00).unwrap();
        dev.write(start).unwrap();
        dev.toggle_pin(pin).unwrap();
        prop_assert_eq!(dev.output_cache(), start ^ (1u8 << pin));
        dev.toggle_pin(pin).unwrap();
        prop_assert_eq!(dev.output_cache(), start);
    }
}

trait IntoBus {
    fn into_bus(self) -> SimulatedPcf8574;
}

impl IntoBus for Pcf8574<SimulatedPcf8574> {
    fn into_bus(self) -> SimulatedPcf8574 {
        let mut slot = Some(self);
        Pcf8574::delete(&mut slot, &mut MockGpio::new()).unwrap()
    }
}

#[test]
fn externally_pulled_input_reads_low() {
    let mut dev = chip();
    dev.set_direction(0b0000_0100).unwrap();
    let mut sim = dev.into_bus();
    sim.pull_low(0b0000_0100);

    let mut dev = Pcf8574::new(sim, I2cAddress::PCF8574);
    assert_eq!(dev.read_pin(2).unwrap(), PinState::Low);
    assert_eq!(dev.read_pin(3).unwrap(), PinState::High);
}

#[test]
fn probe_falls_back_to_the_a_variant() {
    let bus = RefCell::new(SimulatedPcf8574::new(I2cAddress::PCF8574A));
    let mut gpio = MockGpio::new();

    let mut slot = Some(Pcf8574::new(RefCellDevice::new(&bus), I2cAddress::PCF8574));
    let err = slot.as_mut().unwrap().probe().unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert!(Pcf8574::delete(&mut slot, &mut gpio).is_some());

    let mut dev = Pcf8574::new(RefCellDevice::new(&bus), I2cAddress::PCF8574A);
    assert_eq!(dev.probe().unwrap(), 0xFF);
    assert_eq!(dev.address(), I2cAddress::PCF8574A);
}

#[test]
fn failed_write_keeps_intent_and_flush_retries() {
    let bus = RefCell::new(SimulatedPcf8574::new(I2cAddress::PCF8574));
    let mut dev = Pcf8574::new(RefCellDevice::new(&bus), I2cAddress::PCF8574);
    dev.set_direction(0x00).unwrap();

    bus.borrow_mut().set_failing(true);
    assert_eq!(
        dev.write(0x5A).unwrap_err(),
        Error::Transport(ErrorKind::Other)
    );
    assert_eq!(dev.output_cache(), 0x5A);
    assert_ne!(bus.borrow().latch(), 0x5A);

    bus.borrow_mut().set_failing(false);
    dev.flush().unwrap();
    assert_eq!(bus.borrow().latch(), 0x5A);
}

#[test]
fn delete_twice_is_harmless() {
    let bus = RefCell::new(SimulatedPcf8574::new(I2cAddress::PCF8574));
    let mut gpio = MockGpio::new();
    let mut slot = Some(Pcf8574::new(RefCellDevice::new(&bus), I2cAddress::PCF8574));

    assert!(Pcf8574::delete(&mut slot, &mut gpio).is_some());
    assert!(slot.is_none());
    assert!(Pcf8574::delete(&mut slot, &mut gpio).is_none());
    assert_eq!(bus.borrow().transaction_count(), 0);
    assert_eq!(gpio.reset_count(), 0);
}

#[test]
fn interrupt_register_twice_and_unregister_absent_fail() {
    static NOTIFIER: InterruptNotifier = InterruptNotifier::new();

    let mut gpio = MockGpio::new();
    let mut dev = chip();

    assert_eq!(
        dev.unregister_interrupt(&mut gpio),
        Err(InterruptError::NotRegistered)
    );

    dev.register_interrupt(&mut gpio, 10, &NOTIFIER).unwrap();
    assert_eq!(dev.interrupt_pin(), Some(10));
    assert_eq!(
        dev.register_interrupt(&mut gpio, 11, &NOTIFIER),
        Err(InterruptError::AlreadyRegistered)
    );
    assert!(!gpio.has_handler(11));

    dev.unregister_interrupt(&mut gpio).unwrap();
    assert_eq!(dev.interrupt_pin(), None);
    assert!(!gpio.has_handler(10));
}

#[test]
fn delete_tears_down_a_registered_interrupt() {
    static NOTIFIER: InterruptNotifier = InterruptNotifier::new();

    let mut gpio = MockGpio::new();
    let mut slot = Some(chip());
    slot.as_mut()
        .unwrap()
        .register_interrupt(&mut gpio, 10, &NOTIFIER)
        .unwrap();

    assert!(Pcf8574::delete(&mut slot, &mut gpio).is_some());
    assert!(!gpio.has_handler(10));
    assert_eq!(gpio.reset_count(), 1);
}

#[tokio::test]
async fn interrupt_wakes_the_worker_with_fresh_pins() {
    static NOTIFIER: InterruptNotifier = InterruptNotifier::new();

    let bus = RefCell::new(SimulatedPcf8574::new(I2cAddress::PCF8574));
    let mut gpio = MockGpio::new();
    let mut dev = Pcf8574::new(RefCellDevice::new(&bus), I2cAddress::PCF8574);
    dev.register_interrupt(&mut gpio, 10, &NOTIFIER).unwrap();

    // Button on P1 pressed: chip pulls INT low, host ISR runs.
    bus.borrow_mut().pull_low(0b0000_0010);
    assert!(gpio.fire(10));
    assert!(NOTIFIER.is_pending());

    let pins = dev.wait_for_change(&NOTIFIER).await.unwrap();
    assert_eq!(pins, 0b1111_1101);
    assert!(!NOTIFIER.is_pending());
}
