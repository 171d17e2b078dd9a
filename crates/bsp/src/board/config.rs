//! HOPE badge wiring
//!
//! | Signal            | GPIO | Notes                                   |
//! |-------------------|------|-----------------------------------------|
//! | I2C SDA / SCL     | 8/9  | 400 kHz, internal pull-ups              |
//! | Button 1          | 0    | Active-low                              |
//! | Button 2          | 14   | Active-low                              |
//! | Button 3 / 4      | 19/20| Shared with USB D-/D+, off by default   |
//! | Status LED        | 15   | Active-high                             |
//! | RGB strip         | 48   | WS2812, GRB, 10 MHz RMT clock           |
//! | Vibration motor   | 21   | Active-high                             |
//! | IrDA TX / RX      | 17/18|                                         |
//! | Expander INT      | 10   | Open drain, active-low                  |

use platform::config::{
    BUTTON_1_GPIO, BUTTON_2_GPIO, BUTTON_3_GPIO, BUTTON_4_GPIO, BUTTON_COUNT, EXPANDER_INT_GPIO,
    IRDA_RX_GPIO, IRDA_TX_GPIO, LED_RGB_GPIO, LED_RGB_PIXELS, LED_RGB_RMT_RESOLUTION_HZ,
    STATUS_LED_GPIO, VIBRAMOTOR_GPIO,
};
use platform::{ActiveLevel, I2cAddress, I2cConfig, LedModel};

/// One button's wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Host GPIO
    pub gpio: u8,
    /// Level that means pressed
    pub active_level: ActiveLevel,
    /// Configure this button in `buttons_init`
    pub enabled: bool,
}

/// Addressable RGB strip wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedRgbConfig {
    /// Data line GPIO
    pub gpio: u8,
    /// Number of pixels
    pub pixels: usize,
    /// Chip model and colour order
    pub model: LedModel,
    /// RMT counter clock in Hz
    pub rmt_resolution_hz: u32,
}

/// Complete board wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// Shared I2C bus
    pub i2c: I2cConfig,
    /// Buttons in board index order
    pub buttons: [ButtonConfig; BUTTON_COUNT],
    /// Single status LED
    pub status_led_gpio: u8,
    /// RGB strip
    pub led_rgb: LedRgbConfig,
    /// Vibration motor output
    pub vibramotor_gpio: u8,
    /// IrDA transmitter
    pub irda_tx_gpio: u8,
    /// IrDA receiver
    pub irda_rx_gpio: u8,
    /// Host pin wired to the expander INT line, if fitted
    pub expander_int_gpio: Option<u8>,
    /// Expander addresses to probe, in order
    pub expander_addresses: [I2cAddress; 2],
}

impl Default for BoardConfig {
    fn default() -> Self {
        let button = |gpio, enabled| ButtonConfig {
            gpio,
            active_level: ActiveLevel::Low,
            enabled,
        };
        Self {
            i2c: I2cConfig::default(),
            // Buttons 3 and 4 share the USB data lines.
            buttons: [
                button(BUTTON_1_GPIO, true),
                button(BUTTON_2_GPIO, true),
                button(BUTTON_3_GPIO, false),
                button(BUTTON_4_GPIO, false),
            ],
            status_led_gpio: STATUS_LED_GPIO,
            led_rgb: LedRgbConfig {
                gpio: LED_RGB_GPIO,
                pixels: LED_RGB_PIXELS,
                model: LedModel::Ws2812Grb,
                rmt_resolution_hz: LED_RGB_RMT_RESOLUTION_HZ,
            },
            vibramotor_gpio: VIBRAMOTOR_GPIO,
            irda_tx_gpio: IRDA_TX_GPIO,
            irda_rx_gpio: IRDA_RX_GPIO,
            expander_int_gpio: Some(EXPANDER_INT_GPIO),
            expander_addresses: [I2cAddress::PCF8574, I2cAddress::PCF8574A],
        }
    }
}

impl BoardConfig {
    /// Same wiring with buttons 3 and 4 enabled. Only valid when USB is not
    /// in use.
    #[must_use]
    pub fn with_usb_buttons(mut self) -> Self {
        for button in self.buttons.iter_mut().skip(2) {
            button.enabled = true;
        }
        self
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn default_probes_pcf8574_then_pcf8574a() {
        let cfg = BoardConfig::default();
        assert_eq!(cfg.expander_addresses[0].get(), 0x20);
        assert_eq!(cfg.expander_addresses[1].get(), 0x38);
    }

    #[test]
    fn usb_buttons_are_off_by_default() {
        let cfg = BoardConfig::default();
        let enabled: Vec<bool> = cfg.buttons.iter().map(|b| b.enabled).collect();
        assert_eq!(enabled, [true, true, false, false]);

        let cfg = cfg.with_usb_buttons();
        assert!(cfg.buttons.iter().all(|b| b.enabled));
    }

    #[test]
    fn rgb_strip_is_ws2812_at_10mhz() {
        let cfg = BoardConfig::default();
        assert_eq!(cfg.led_rgb.model, LedModel::Ws2812Grb);
        assert_eq!(cfg.led_rgb.rmt_resolution_hz, 10_000_000);
        assert_eq!(cfg.i2c.frequency, 400_000);
    }
}
