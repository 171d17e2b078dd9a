//! PCF8574 / PCF8574A register model.
//!
//! Reference: NXP PCF8574/PCF8574A datasheet (Rev. 5)
//!
//! The chip has no register pointer. A one-byte write loads the output latch,
//! a one-byte read samples the eight pins.

/// PCF8574 7-bit address with A2..A0 strapped low.
pub const ADDRESS_PCF8574: u8 = 0x20;
/// PCF8574A 7-bit address with A2..A0 strapped low.
pub const ADDRESS_PCF8574A: u8 = 0x38;

/// Number of quasi-bidirectional pins (P0..P7).
pub const PIN_COUNT: u8 = 8;

/// Latch state after power-on reset: every pin high (weak pull-up).
pub const POWER_ON_STATE: u8 = 0xFF;

/// Bit mask for pin `pin`, or `None` if `pin` is not P0..P7.
#[inline]
pub const fn pin_mask(pin: u8) -> Option<u8> {
    if pin < PIN_COUNT {
        1u8.checked_shl(pin as u32)
    } else {
        None
    }
}

/// Byte to put on the wire: input pins are forced high so their pull-up
/// stays enabled, output pins follow the cache.
#[inline]
pub const fn effective_byte(output_cache: u8, direction_mask: u8) -> u8 {
    output_cache | direction_mask
}
