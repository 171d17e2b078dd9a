//! Board configuration and constants
//!
//! Central wiring values for the HOPE badge. Board code should reference
//! these constants rather than hardcoding pin numbers.

/// Board name
pub const BOARD_NAME: &str = "HOPE Badge";

/// Crate version (synchronized with Cargo.toml)
pub const BOARD_SUPPORT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of host GPIOs. Valid pin numbers are `0..GPIO_NUM_MAX`.
pub const GPIO_NUM_MAX: u8 = 49;

// ── I2C ──────────────────────────────────────────────────────────────────────

/// I2C controller index
pub const I2C_PORT: u8 = 0;
/// I2C data line
pub const I2C_SDA_GPIO: u8 = 8;
/// I2C clock line
pub const I2C_SCL_GPIO: u8 = 9;
/// I2C bus clock in Hz (fast mode)
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

// ── Buttons ──────────────────────────────────────────────────────────────────

/// Number of user buttons on the board
pub const BUTTON_COUNT: usize = 4;
/// Button 1 GPIO
pub const BUTTON_1_GPIO: u8 = 0;
/// Button 2 GPIO
pub const BUTTON_2_GPIO: u8 = 14;
/// Button 3 GPIO (shared with USB D-)
pub const BUTTON_3_GPIO: u8 = 19;
/// Button 4 GPIO (shared with USB D+)
pub const BUTTON_4_GPIO: u8 = 20;

// ── LEDs ─────────────────────────────────────────────────────────────────────

/// Single status LED
pub const STATUS_LED_GPIO: u8 = 15;
/// Addressable RGB strip data line
pub const LED_RGB_GPIO: u8 = 48;
/// Number of pixels on the RGB strip
pub const LED_RGB_PIXELS: usize = 4;
/// RMT counter clock used to generate the WS2812 waveform
pub const LED_RGB_RMT_RESOLUTION_HZ: u32 = 10_000_000;

// ── Misc peripherals ─────────────────────────────────────────────────────────

/// Vibration motor driver input
pub const VIBRAMOTOR_GPIO: u8 = 21;
/// IrDA transmitter
pub const IRDA_TX_GPIO: u8 = 17;
/// IrDA receiver
pub const IRDA_RX_GPIO: u8 = 18;
/// PCF8574 INT line (open drain, active low)
pub const EXPANDER_INT_GPIO: u8 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::assertions_on_constants)]
    #[test]
    fn board_pins_are_valid_gpios() {
        for pin in [
            I2C_SDA_GPIO,
            I2C_SCL_GPIO,
            BUTTON_1_GPIO,
            BUTTON_2_GPIO,
            BUTTON_3_GPIO,
            BUTTON_4_GPIO,
            STATUS_LED_GPIO,
            LED_RGB_GPIO,
            VIBRAMOTOR_GPIO,
            IRDA_TX_GPIO,
            IRDA_RX_GPIO,
            EXPANDER_INT_GPIO,
        ] {
            assert!(pin < GPIO_NUM_MAX, "GPIO{pin} out of range");
        }
    }

    #[test]
    fn i2c_runs_in_fast_mode() {
        assert_eq!(I2C_FREQUENCY_HZ, 400_000);
    }
}
