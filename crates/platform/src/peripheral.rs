//! Peripheral abstraction layer
//!
//! I2C addressing and bus configuration. Transfers themselves go through
//! `embedded_hal::i2c::I2c`; this module only carries the validated values
//! the drivers are constructed from.

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

impl core::fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "value {:#04x} outside {:#04x}..={:#04x}",
            self.value, self.min, self.max
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRangeError {}

/// Validated 7-bit I2C device address.
///
/// ## Reserved I2C addresses (I2C specification):
/// - 0x00–0x07: reserved (general call, CBUS, etc.)
/// - 0x78–0x7F: reserved (10-bit address prefix, device ID, etc.)
///
/// ```rust
/// use platform::I2cAddress;
///
/// let expander = I2cAddress::pcf8574(0b000).unwrap();
/// assert_eq!(expander.get(), 0x20);
/// assert!(I2cAddress::try_new(0x80).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// Lowest non-reserved address.
    pub const MIN: u8 = 0x08;
    /// Highest non-reserved address.
    pub const MAX: u8 = 0x77;

    /// PCF8574 with A2..A0 strapped low.
    pub const PCF8574: Self = Self(0x20);
    /// PCF8574A with A2..A0 strapped low.
    pub const PCF8574A: Self = Self(0x38);
    /// MAX17048 fuel gauge (fixed in silicon).
    pub const MAX17048: Self = Self(0x36);

    /// Create an I2C address, rejecting values wider than 7 bits and the
    /// I2C-reserved ranges.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `addr <= 0x07` or `addr >= 0x78`.
    pub const fn try_new(addr: u8) -> Result<Self, OutOfRangeError> {
        if addr < Self::MIN || addr > Self::MAX {
            Err(OutOfRangeError {
                value: addr as u32,
                min: Self::MIN as u32,
                max: Self::MAX as u32,
            })
        } else {
            Ok(Self(addr))
        }
    }

    /// PCF8574 address for the given A2..A0 strap (`0..=7`).
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `a2a1a0 > 7`.
    pub const fn pcf8574(a2a1a0: u8) -> Result<Self, OutOfRangeError> {
        Self::strapped(Self::PCF8574, a2a1a0)
    }

    /// PCF8574A address for the given A2..A0 strap (`0..=7`).
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `a2a1a0 > 7`.
    pub const fn pcf8574a(a2a1a0: u8) -> Result<Self, OutOfRangeError> {
        Self::strapped(Self::PCF8574A, a2a1a0)
    }

    const fn strapped(base: Self, a2a1a0: u8) -> Result<Self, OutOfRangeError> {
        if a2a1a0 > 0b111 {
            return Err(OutOfRangeError {
                value: a2a1a0 as u32,
                min: 0,
                max: 0b111,
            });
        }
        Self::try_new(base.0 | a2a1a0)
    }

    /// Return the 7-bit I2C address.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for I2cAddress {
    type Error = OutOfRangeError;

    fn try_from(addr: u8) -> Result<Self, Self::Error> {
        Self::try_new(addr)
    }
}

impl From<I2cAddress> for u8 {
    fn from(addr: I2cAddress) -> Self {
        addr.0
    }
}

impl core::fmt::Display for I2cAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// I2C bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Controller index
    pub port: u8,
    /// Data line GPIO
    pub sda: u8,
    /// Clock line GPIO
    pub scl: u8,
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Enable the internal pull-ups on SDA/SCL
    pub internal_pullups: bool,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            port: crate::config::I2C_PORT,
            sda: crate::config::I2C_SDA_GPIO,
            scl: crate::config::I2C_SCL_GPIO,
            frequency: crate::config::I2C_FREQUENCY_HZ,
            internal_pullups: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn pcf8574_helpers_apply_strap() {
        assert_eq!(I2cAddress::pcf8574(0).unwrap().get(), 0x20);
        assert_eq!(I2cAddress::pcf8574(7).unwrap().get(), 0x27);
        assert_eq!(I2cAddress::pcf8574a(0).unwrap().get(), 0x38);
        assert_eq!(I2cAddress::pcf8574a(7).unwrap().get(), 0x3F);
    }

    #[test]
    fn typed_constants_match_strapped_zero() {
        assert_eq!(I2cAddress::pcf8574(0).unwrap(), I2cAddress::PCF8574);
        assert_eq!(I2cAddress::pcf8574a(0).unwrap(), I2cAddress::PCF8574A);
        assert_eq!(I2cAddress::try_new(0x36).unwrap(), I2cAddress::MAX17048);
    }

    #[test]
    fn strap_wider_than_three_bits_is_rejected() {
        let err = I2cAddress::pcf8574(8).unwrap_err();
        assert_eq!(err.value, 8);
        assert_eq!(err.max, 7);
    }

    #[test]
    fn default_bus_is_fast_mode() {
        let cfg = I2cConfig::default();
        assert_eq!(cfg.frequency, 400_000);
        assert!(cfg.internal_pullups);
    }
}
