//! Simulated DS1307 for host tests
//!
//! Models the register file, the auto-incrementing register pointer and
//! the oscillator. Every bus transaction is logged, including failed ones.

use segclock_core::bcd::{bcd_to_decimal, decimal_to_bcd};
use segclock_core::TimeOfDay;
use segclock_hal::{I2cBus, I2cBusError};

use super::ds1307::{bits, DS1307_ADDRESS};

/// Register file size (time registers, control and 56 bytes of RAM)
const REGISTER_COUNT: usize = 64;

/// A logged bus transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    Write(u8, Vec<u8>),
    Read(u8, usize),
}

pub struct SimDs1307 {
    pub registers: [u8; REGISTER_COUNT],
    pub pointer: usize,
    pub ops: Vec<BusOp>,
    /// Fail the next transaction with this error
    pub fail_next: Option<I2cBusError>,
}

impl SimDs1307 {
    /// Chip running at 00:00:00 in 24-hour mode
    pub fn new() -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
            pointer: 0,
            ops: Vec::new(),
            fail_next: None,
        }
    }

    fn check(&mut self, address: u8) -> Result<(), I2cBusError> {
        if let Some(e) = self.fail_next.take() {
            return Err(e);
        }
        if address != DS1307_ADDRESS {
            return Err(I2cBusError::Nack);
        }
        Ok(())
    }

    /// Let the oscillator run for `secs` seconds
    ///
    /// Does nothing while the clock-halt flag is set.
    pub fn advance(&mut self, secs: u32) {
        if self.registers[0] & bits::CLOCK_HALT != 0 {
            return;
        }

        let twelve_hour = self.registers[2] & bits::HOUR_12_MODE != 0;
        let hours = if twelve_hour {
            let hour = bcd_to_decimal(self.registers[2] & bits::HOUR_12_MASK).unwrap();
            TimeOfDay::hours_from_12(hour, self.registers[2] & bits::PM != 0).unwrap()
        } else {
            bcd_to_decimal(self.registers[2]).unwrap()
        };
        let now = TimeOfDay {
            hours,
            minutes: bcd_to_decimal(self.registers[1]).unwrap(),
            seconds: bcd_to_decimal(self.registers[0]).unwrap(),
        };

        let later = now.advance(secs);
        self.registers[0] = decimal_to_bcd(later.seconds).unwrap();
        self.registers[1] = decimal_to_bcd(later.minutes).unwrap();
        self.registers[2] = if twelve_hour {
            let (hour, pm) = later.to_12_hour();
            let pm_bit = if pm { bits::PM } else { 0 };
            bits::HOUR_12_MODE | pm_bit | decimal_to_bcd(hour).unwrap()
        } else {
            decimal_to_bcd(later.hours).unwrap()
        };
    }
}

impl I2cBus for SimDs1307 {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.ops.push(BusOp::Write(address, data.to_vec()));
        self.check(address)?;

        if let Some((&pointer, payload)) = data.split_first() {
            self.pointer = pointer as usize % REGISTER_COUNT;
            for &byte in payload {
                self.registers[self.pointer] = byte;
                self.pointer = (self.pointer + 1) % REGISTER_COUNT;
            }
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.ops.push(BusOp::Read(address, buf.len()));
        self.check(address)?;

        for byte in buf.iter_mut() {
            *byte = self.registers[self.pointer];
            self.pointer = (self.pointer + 1) % REGISTER_COUNT;
        }
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.write(address, write_data)?;
        self.read(address, read_buf)
    }
}

#[test]
fn test_sim_ticks_and_wraps() {
    let mut sim = SimDs1307::new();
    sim.registers[..3].copy_from_slice(&[0x58, 0x59, 0x23]);

    sim.advance(3);
    assert_eq!(&sim.registers[..3], &[0x01, 0x00, 0x00]);

    // Halted oscillator stays put
    sim.registers[0] |= bits::CLOCK_HALT;
    sim.advance(10);
    assert_eq!(sim.registers[0], 0x81);
}
