//! DS1307 real-time clock (time registers only)
//!
//! The DS1307 keeps time in seven BCD registers behind an internal
//! register pointer that auto-increments on every byte transferred.
//!
//! # Register layout
//!
//! | Addr | Contents                                  |
//! |------|-------------------------------------------|
//! | 0x00 | CH (bit 7) + seconds 00-59                 |
//! | 0x01 | minutes 00-59                              |
//! | 0x02 | 12/24 (bit 6) + hours, PM (bit 5) in 12h   |
//! | 0x03 | day of week                                |
//! | 0x04 | date                                       |
//! | 0x05 | month                                      |
//! | 0x06 | year                                       |
//!
//! Only seconds, minutes and hours are decoded. A read still transfers
//! the whole seven-register block so the transaction matches the
//! chip's usual burst read.

use segclock_core::bcd::{bcd_to_decimal, decimal_to_bcd};
use segclock_core::traits::{RealTimeClock, RtcError};
use segclock_core::{HourMode, TimeOfDay};
use segclock_hal::I2cBus;

/// Fixed 7-bit I2C address of the DS1307
pub const DS1307_ADDRESS: u8 = 0x68;

/// Number of registers in one time block read
pub const TIME_BLOCK_LEN: usize = 7;

/// Register pointer followed by seconds, minutes, hours
pub const TIME_WRITE_LEN: usize = 4;

/// DS1307 register addresses
pub mod reg {
    /// Seconds + clock halt
    pub const SECONDS: u8 = 0x00;
    /// Minutes
    pub const MINUTES: u8 = 0x01;
    /// Hours + 12/24 mode
    pub const HOURS: u8 = 0x02;
    /// Day of week (1-7)
    pub const DAY: u8 = 0x03;
    /// Day of month
    pub const DATE: u8 = 0x04;
    /// Month
    pub const MONTH: u8 = 0x05;
    /// Year (00-99)
    pub const YEAR: u8 = 0x06;
}

/// Register bit masks
pub mod bits {
    /// Clock halt flag in the seconds register
    pub const CLOCK_HALT: u8 = 0x80;
    /// 12-hour mode select in the hours register
    pub const HOUR_12_MODE: u8 = 0x40;
    /// PM flag in the hours register (12-hour mode only)
    pub const PM: u8 = 0x20;
    /// Hour digits in 12-hour mode
    pub const HOUR_12_MASK: u8 = 0x1F;
}

/// Decode one BCD register and check it against `max`
fn decode_field<E>(register: u8, raw: u8, value_bits: u8, max: u8) -> Result<u8, RtcError<E>> {
    match bcd_to_decimal(value_bits) {
        Ok(value) if value <= max => Ok(value),
        _ => Err(RtcError::MalformedRegisterData { register, raw }),
    }
}

/// Decode the hours register according to `mode`
fn decode_hours<E>(raw: u8, mode: HourMode) -> Result<u8, RtcError<E>> {
    let malformed = RtcError::MalformedRegisterData {
        register: reg::HOURS,
        raw,
    };

    match mode {
        HourMode::TwentyFourHour => {
            if raw & bits::HOUR_12_MODE != 0 {
                return Err(malformed);
            }
            decode_field(reg::HOURS, raw, raw, 23)
        }
        HourMode::TwelveHour => {
            if raw & bits::HOUR_12_MODE == 0 {
                return Err(malformed);
            }
            let hour = decode_field(reg::HOURS, raw, raw & bits::HOUR_12_MASK, 12)?;
            TimeOfDay::hours_from_12(hour, raw & bits::PM != 0).ok_or(malformed)
        }
    }
}

/// Encode hours for the hours register according to `mode`
fn encode_hours<E>(hours: u8, mode: HourMode) -> Result<u8, RtcError<E>> {
    match mode {
        HourMode::TwentyFourHour => {
            decimal_to_bcd(hours).map_err(|e| RtcError::from_bcd(reg::HOURS, e))
        }
        HourMode::TwelveHour => {
            let time = TimeOfDay {
                hours,
                minutes: 0,
                seconds: 0,
            };
            let (hour, pm) = time.to_12_hour();
            let digits = decimal_to_bcd(hour).map_err(|e| RtcError::from_bcd(reg::HOURS, e))?;
            let pm_bit = if pm { bits::PM } else { 0 };
            Ok(bits::HOUR_12_MODE | pm_bit | digits)
        }
    }
}

/// Decode a time block read starting at the seconds register
///
/// The clock-halt flag is masked off the seconds value. Registers past
/// the hours register are ignored.
pub fn decode_time<E>(
    raw: &[u8; TIME_BLOCK_LEN],
    mode: HourMode,
) -> Result<TimeOfDay, RtcError<E>> {
    let seconds = decode_field(reg::SECONDS, raw[0], raw[0] & !bits::CLOCK_HALT, 59)?;
    let minutes = decode_field(reg::MINUTES, raw[1], raw[1], 59)?;
    let hours = decode_hours(raw[2], mode)?;

    Ok(TimeOfDay {
        hours,
        minutes,
        seconds,
    })
}

/// Build the write transaction for `time`
///
/// Returns the register pointer (seconds) followed by the three encoded
/// time registers. The clock-halt bit is always clear.
pub fn encode_time<E>(
    time: &TimeOfDay,
    mode: HourMode,
) -> Result<[u8; TIME_WRITE_LEN], RtcError<E>> {
    time.validate()?;

    Ok([
        reg::SECONDS,
        decimal_to_bcd(time.seconds).map_err(|e| RtcError::from_bcd(reg::SECONDS, e))?,
        decimal_to_bcd(time.minutes).map_err(|e| RtcError::from_bcd(reg::MINUTES, e))?,
        encode_hours(time.hours, mode)?,
    ])
}

/// DS1307 driver
///
/// Owns (or mutably borrows) the I2C bus the chip is attached to. Every
/// operation first repositions the chip's register pointer explicitly, so
/// no state is assumed between calls.
pub struct Ds1307<I2C> {
    i2c: I2C,
    address: u8,
    hour_mode: HourMode,
}

impl<I2C: I2cBus> Ds1307<I2C> {
    /// Create a driver at the standard address in 24-hour mode
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DS1307_ADDRESS)
    }

    /// Create a driver for a compatible chip at another address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            hour_mode: HourMode::TwentyFourHour,
        }
    }

    /// Select the hours register format
    pub fn with_hour_mode(mut self, hour_mode: HourMode) -> Self {
        self.hour_mode = hour_mode;
        self
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Hours register format in use
    pub fn hour_mode(&self) -> HourMode {
        self.hour_mode
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Move the chip's register pointer to `register`
    fn set_register_pointer(&mut self, register: u8) -> Result<(), RtcError<I2C::Error>> {
        self.i2c
            .write(self.address, &[register])
            .map_err(RtcError::TransportFailure)
    }

    /// Read the raw seven-register time block
    pub fn read_time_block(&mut self) -> Result<[u8; TIME_BLOCK_LEN], RtcError<I2C::Error>> {
        self.set_register_pointer(reg::SECONDS)?;

        let mut block = [0u8; TIME_BLOCK_LEN];
        self.i2c
            .read(self.address, &mut block)
            .map_err(RtcError::TransportFailure)?;
        Ok(block)
    }

    /// Check the oscillator's clock-halt flag
    ///
    /// A freshly powered chip (or one whose backup battery died) comes up
    /// halted and keeps its time registers frozen until written.
    pub fn is_halted(&mut self) -> Result<bool, RtcError<I2C::Error>> {
        self.set_register_pointer(reg::SECONDS)?;

        let mut seconds = [0u8; 1];
        self.i2c
            .read(self.address, &mut seconds)
            .map_err(RtcError::TransportFailure)?;
        Ok(seconds[0] & bits::CLOCK_HALT != 0)
    }
}

impl<I2C: I2cBus> RealTimeClock for Ds1307<I2C> {
    type BusError = I2C::Error;

    fn get_time(&mut self) -> Result<TimeOfDay, RtcError<I2C::Error>> {
        let block = self.read_time_block()?;
        decode_time(&block, self.hour_mode)
    }

    fn set_time(&mut self, time: &TimeOfDay) -> Result<(), RtcError<I2C::Error>> {
        let frame = encode_time(time, self.hour_mode)?;
        self.i2c
            .write(self.address, &frame)
            .map_err(RtcError::TransportFailure)
    }
}
