// RTC driver for PCF85063A/PCF85063TP real-time clock chips.
// Datasheet: https://files.waveshare.com/wiki/common/Pcf85063atl1118-NdPQpTGE-loeW7GbZ7.pdf
//
// Besides wall-clock time this face also uses the chip's one byte of
// battery-backed scratch RAM (register 0x03) to persist the animations
// setting across restarts and battery swaps of the host board.

use embedded_hal::i2c::I2c;

use crate::clock::DateTime;
use crate::settings::SettingsStore;

pub const I2C_ADDR: u8 = 0x51;

const REG_RAM_BYTE: u8 = 0x03;
const REG_TIME_BASE: u8 = 0x04; // sec, min, hour, day, weekday, month, year

// Scratch-RAM encoding of the persisted flag. The tag in the upper bits
// distinguishes a value this firmware wrote from whatever the register
// holds after first power-up.
const RAM_TAG: u8 = 0xA0;
const RAM_TAG_MASK: u8 = 0xFE;

pub struct Pcf85063<I2C> {
    i2c: I2C,
}

impl<I2C, E> Pcf85063<I2C>
where
    I2C: I2c<Error = E>,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn into_inner(self) -> I2C {
        self.i2c
    }

    // Read datetime. Returns (dt, vl_flag) where vl_flag == true means time
    // is unreliable (power loss).
    pub fn read_datetime(&mut self) -> Result<(DateTime, bool), E> {
        let mut buf = [0u8; 7];
        self.i2c.write_read(I2C_ADDR, &[REG_TIME_BASE], &mut buf)?;
        let vl = (buf[0] & 0x80) != 0;
        Ok((
            DateTime {
                year: 2000 + bcd_decode(buf[6]) as u16,
                month: bcd_decode(buf[5] & 0x1F),
                day: bcd_decode(buf[3] & 0x3F),
                hour: bcd_decode(buf[2] & 0x3F),
                minute: bcd_decode(buf[1] & 0x7F),
                second: bcd_decode(buf[0] & 0x7F),
            },
            vl,
        ))
    }

    // Set datetime. The chip's weekday register is left at zero; the face
    // derives the weekday from the date.
    pub fn set_datetime(&mut self, dt: &DateTime) -> Result<(), E> {
        let data = [
            REG_TIME_BASE,
            bcd_encode(dt.second),
            bcd_encode(dt.minute),
            bcd_encode(dt.hour),
            bcd_encode(dt.day),
            0,
            bcd_encode(dt.month),
            bcd_encode((dt.year % 100) as u8),
        ];
        self.i2c.write(I2C_ADDR, &data)?;
        Ok(())
    }

    fn read_ram_byte(&mut self) -> Result<u8, E> {
        let mut buf = [0u8];
        self.i2c.write_read(I2C_ADDR, &[REG_RAM_BYTE], &mut buf)?;
        Ok(buf[0])
    }

    fn write_ram_byte(&mut self, value: u8) -> Result<(), E> {
        self.i2c.write(I2C_ADDR, &[REG_RAM_BYTE, value])?;
        Ok(())
    }
}

impl<I2C, E> SettingsStore for Pcf85063<I2C>
where
    I2C: I2c<Error = E>,
{
    type Error = E;

    fn read_animations(&mut self) -> Result<Option<bool>, E> {
        let raw = self.read_ram_byte()?;
        if raw & RAM_TAG_MASK == RAM_TAG {
            Ok(Some(raw & 0x01 != 0))
        } else {
            Ok(None)
        }
    }

    fn write_animations(&mut self, enabled: bool) -> Result<(), E> {
        self.write_ram_byte(RAM_TAG | enabled as u8)
    }
}

// BCD encode/decode helpers
fn bcd_decode(v: u8) -> u8 {
    (v & 0x0F) + ((v >> 4) * 10)
}

fn bcd_encode(v: u8) -> u8 {
    ((v / 10) << 4) | (v % 10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use core::convert::Infallible;
    use embedded_hal::i2c::{ErrorType, Operation};

    // Register-file fake of the chip: a write's first byte sets the register
    // pointer, reads continue from it.
    struct FakeChip {
        regs: [u8; 32],
        ptr: usize,
    }

    impl FakeChip {
        fn new() -> Self {
            Self {
                regs: [0; 32],
                ptr: 0,
            }
        }
    }

    impl ErrorType for FakeChip {
        type Error = Infallible;
    }

    impl I2c for FakeChip {
        fn transaction(
            &mut self,
            _address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Infallible> {
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        if let Some((reg, rest)) = bytes.split_first() {
                            self.ptr = *reg as usize;
                            for (i, b) in rest.iter().enumerate() {
                                self.regs[self.ptr + i] = *b;
                            }
                        }
                    }
                    Operation::Read(buf) => {
                        for (i, b) in buf.iter_mut().enumerate() {
                            *b = self.regs[self.ptr + i];
                        }
                    }
                }
            }
            Ok(())
        }
    }

    fn dt() -> DateTime {
        DateTime {
            year: 2026,
            month: 8,
            day: 7,
            hour: 13,
            minute: 5,
            second: 42,
        }
    }

    #[test]
    fn datetime_roundtrips_through_bcd() {
        let mut rtc = Pcf85063::new(FakeChip::new());
        rtc.set_datetime(&dt()).unwrap();
        let (read, vl) = rtc.read_datetime().unwrap();
        assert_eq!(read, dt());
        assert!(!vl);
    }

    #[test]
    fn vl_flag_reports_power_loss() {
        let mut chip = FakeChip::new();
        chip.regs[REG_TIME_BASE as usize] = 0x80 | 0x42; // VL set, 42 seconds
        let mut rtc = Pcf85063::new(chip);
        let (read, vl) = rtc.read_datetime().unwrap();
        assert!(vl);
        assert_eq!(read.second, 42);
    }

    #[test]
    fn scratch_ram_persists_the_flag() {
        let mut rtc = Pcf85063::new(FakeChip::new());
        // Nothing written yet: reads as absent, defaults apply.
        assert_eq!(rtc.read_animations().unwrap(), None);
        assert!(Settings::load(&mut rtc).animations);

        rtc.write_animations(false).unwrap();
        assert_eq!(rtc.read_animations().unwrap(), Some(false));
        rtc.write_animations(true).unwrap();
        assert_eq!(rtc.read_animations().unwrap(), Some(true));
    }

    #[test]
    fn untagged_scratch_values_read_as_absent() {
        let mut chip = FakeChip::new();
        chip.regs[REG_RAM_BYTE as usize] = 0x42;
        let mut rtc = Pcf85063::new(chip);
        assert_eq!(rtc.read_animations().unwrap(), None);
    }
}
