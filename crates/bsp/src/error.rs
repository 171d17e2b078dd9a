//! Board-level error type

use embedded_hal::i2c::ErrorKind;

use crate::expander;

/// Board support error
///
/// Collaborator errors are reduced to their kind so one error type covers
/// every subsystem the board context touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BspError {
    /// GPIO number outside `0..GPIO_NUM_MAX`
    InvalidGpio(u8),
    /// Button index outside the button table, or button disabled
    InvalidButton(usize),
    /// Expander pin outside P0..P7
    InvalidExpanderPin(u8),
    /// Peripheral used before its init call succeeded
    NotInitialized,
    /// No expander answered on any candidate address
    NoExpander,
    /// I2C transaction failed
    I2c(ErrorKind),
    /// Host GPIO call failed
    Gpio,
    /// RGB strip call failed
    LedStrip,
    /// Interrupt already registered, or not registered
    Interrupt,
}

impl core::fmt::Display for BspError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidGpio(pin) => write!(f, "invalid GPIO number: {pin}"),
            Self::InvalidButton(idx) => write!(f, "invalid button index: {idx}"),
            Self::InvalidExpanderPin(pin) => write!(f, "invalid expander pin: P{pin}"),
            Self::NotInitialized => write!(f, "peripheral not initialized"),
            Self::NoExpander => write!(f, "no I/O expander found"),
            Self::I2c(kind) => write!(f, "I2C error: {kind:?}"),
            Self::Gpio => write!(f, "GPIO error"),
            Self::LedStrip => write!(f, "LED strip error"),
            Self::Interrupt => write!(f, "interrupt registration error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BspError {}

impl BspError {
    /// Reduce an I2C error to its kind.
    pub fn from_i2c<E: embedded_hal::i2c::Error>(e: &E) -> Self {
        Self::I2c(e.kind())
    }
}

impl<E: embedded_hal::i2c::Error> From<expander::Error<E>> for BspError {
    fn from(e: expander::Error<E>) -> Self {
        match e {
            expander::Error::InvalidPin(pin) => Self::InvalidExpanderPin(pin),
            expander::Error::Transport(e) => Self::from_i2c(&e),
        }
    }
}

impl<E> From<expander::InterruptError<E>> for BspError {
    fn from(e: expander::InterruptError<E>) -> Self {
        match e {
            expander::InterruptError::Gpio(_) => Self::Gpio,
            expander::InterruptError::AlreadyRegistered
            | expander::InterruptError::NotRegistered => Self::Interrupt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expander_errors_map_to_board_errors() {
        let e: expander::Error<ErrorKind> = expander::Error::Transport(ErrorKind::Other);
        assert_eq!(BspError::from(e), BspError::I2c(ErrorKind::Other));
        let e: expander::Error<ErrorKind> = expander::Error::InvalidPin(8);
        assert_eq!(BspError::from(e), BspError::InvalidExpanderPin(8));
        let e: expander::InterruptError<()> = expander::InterruptError::AlreadyRegistered;
        assert_eq!(BspError::from(e), BspError::Interrupt);
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(BspError::InvalidGpio(60).to_string(), "invalid GPIO number: 60");
        assert_eq!(BspError::NoExpander.to_string(), "no I/O expander found");
    }
}
