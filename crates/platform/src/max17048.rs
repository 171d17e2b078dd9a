//! MAX17048 single-cell LiPo fuel gauge.
//!
//! Reference: Analog Devices MAX17048/MAX17049 datasheet (19-6171)
//!
//! All registers are 16 bits wide, big-endian, read with a register-pointer
//! write followed by a repeated-start read.

use embedded_hal::i2c::I2c;

use crate::power::PowerMonitor;

/// 7-bit I2C device address (fixed in silicon).
pub const MAX17048_I2C_ADDR: u8 = 0x36;
/// VCELL: cell voltage, 78.125 µV/LSB.
pub const REG_VCELL: u8 = 0x02;
/// SOC: state of charge, high byte = %, low byte = 1/256 %.
pub const REG_SOC: u8 = 0x04;
/// MODE: quick-start, sleep enable, hibernate status.
pub const REG_MODE: u8 = 0x06;
/// VERSION: production version.
pub const REG_VERSION: u8 = 0x08;
/// CONFIG: RCOMP, sleep, alert threshold.
pub const REG_CONFIG: u8 = 0x0C;
/// CRATE: charge/discharge rate, 0.208 %/hr per LSB.
pub const REG_CRATE: u8 = 0x16;

/// Decode a raw VCELL word to millivolts.
///
/// 78.125 µV/LSB is exactly 5/64 mV.
#[inline]
#[must_use]
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
pub const fn decode_vcell_mv(raw: u16) -> u16 {
    // max 65535 * 5 / 64 = 5119, fits in u16
    ((raw as u32 * 5) / 64) as u16
}

/// Decode a raw SOC word to whole percent, clamped to 100.
///
/// The gauge may report slightly above 100 % right after a full charge.
#[inline]
#[must_use]
pub const fn decode_soc_percent(raw: u16) -> u8 {
    let whole = raw.to_be_bytes()[0];
    if whole > 100 {
        100
    } else {
        whole
    }
}

/// MAX17048 driver over a blocking I2C handle.
pub struct Max17048<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> Max17048<I> {
    /// Bind to the gauge at the default address. No bus traffic.
    pub fn new(i2c: I) -> Self {
        Self {
            i2c,
            address: MAX17048_I2C_ADDR,
        }
    }

    /// Read one 16-bit register.
    pub fn read_register(&mut self, reg: u8) -> Result<u16, I::Error> {
        let mut buf = [0u8; 2];
        self.i2c.write_read(self.address, &[reg], &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Production version word. Used to confirm the gauge answers.
    pub fn version(&mut self) -> Result<u16, I::Error> {
        self.read_register(REG_VERSION)
    }

    /// Cell voltage in millivolts.
    pub fn cell_voltage_mv(&mut self) -> Result<u16, I::Error> {
        self.read_register(REG_VCELL).map(decode_vcell_mv)
    }

    /// State of charge in whole percent.
    pub fn state_of_charge(&mut self) -> Result<u8, I::Error> {
        self.read_register(REG_SOC).map(decode_soc_percent)
    }

    /// Give the I2C handle back.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> PowerMonitor for Max17048<I> {
    type Error = I::Error;

    fn battery_voltage_mv(&mut self) -> Result<u16, Self::Error> {
        self.cell_voltage_mv()
    }

    fn battery_percentage(&mut self) -> Result<u8, Self::Error> {
        self.state_of_charge()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    /// Answers register reads from a fixed table.
    struct RegisterMock {
        vcell: u16,
        soc: u16,
        version: u16,
        pointer_writes: std::vec::Vec<(u8, u8)>,
        fail: bool,
    }

    impl RegisterMock {
        fn new(vcell: u16, soc: u16) -> Self {
            Self {
                vcell,
                soc,
                version: 0x0012,
                pointer_writes: std::vec::Vec::new(),
                fail: false,
            }
        }
    }

    impl ErrorType for RegisterMock {
        type Error = ErrorKind;
    }

    impl I2c for RegisterMock {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            let mut reg = 0;
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(data) => {
                        reg = data[0];
                        self.pointer_writes.push((address, reg));
                    }
                    Operation::Read(buf) => {
                        let word = match reg {
                            REG_VCELL => self.vcell,
                            REG_SOC => self.soc,
                            REG_VERSION => self.version,
                            _ => 0,
                        };
                        buf.copy_from_slice(&word.to_be_bytes());
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn register_addresses_are_correct_per_datasheet() {
        assert_eq!(MAX17048_I2C_ADDR, 0x36);
        assert_eq!(REG_VCELL, 0x02);
        assert_eq!(REG_SOC, 0x04);
        assert_eq!(REG_MODE, 0x06);
        assert_eq!(REG_VERSION, 0x08);
        assert_eq!(REG_CONFIG, 0x0C);
    }

    #[test]
    fn vcell_decode_formula() {
        assert_eq!(decode_vcell_mv(0), 0);
        // 3.7 V = 47360 LSB
        assert_eq!(decode_vcell_mv(47_360), 3700);
        assert_eq!(decode_vcell_mv(u16::MAX), 5119);
    }

    #[test]
    fn soc_decode_drops_fraction_and_clamps() {
        assert_eq!(decode_soc_percent(0x3280), 50);
        assert_eq!(decode_soc_percent(0x6400), 100);
        assert_eq!(decode_soc_percent(0x6580), 100);
    }

    #[test]
    fn voltage_read_uses_vcell_register() {
        let mut gauge = Max17048::new(RegisterMock::new(52_480, 0));
        assert_eq!(gauge.battery_voltage_mv().unwrap(), 4100);
        let mock = gauge.release();
        assert_eq!(mock.pointer_writes, [(MAX17048_I2C_ADDR, REG_VCELL)]);
    }

    #[test]
    fn percentage_read_uses_soc_register() {
        let mut gauge = Max17048::new(RegisterMock::new(0, 0x4B10));
        assert_eq!(gauge.battery_percentage().unwrap(), 75);
    }

    #[test]
    fn bus_error_is_propagated() {
        let mut mock = RegisterMock::new(0, 0);
        mock.fail = true;
        let mut gauge = Max17048::new(mock);
        assert_eq!(gauge.version(), Err(ErrorKind::Other));
    }
}
