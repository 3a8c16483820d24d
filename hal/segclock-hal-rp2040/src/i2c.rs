//! I2C bus adapter for RP2040
//!
//! Wraps a blocking `embedded-hal` I2C master so the drivers can use it
//! through [`segclock_hal::I2cBus`], with errors reduced to
//! [`I2cBusError`].

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use segclock_hal::{I2cBus, I2cBusError, I2cConfig};

/// Map an `embedded-hal` error kind to the shared bus error
pub fn bus_error(kind: ErrorKind) -> I2cBusError {
    match kind {
        ErrorKind::Bus => I2cBusError::Bus,
        ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
        ErrorKind::NoAcknowledge(_) => I2cBusError::Nack,
        ErrorKind::Overrun => I2cBusError::Overrun,
        _ => I2cBusError::Other,
    }
}

/// Build an embassy-rp I2C configuration
pub fn i2c_config(config: I2cConfig) -> embassy_rp::i2c::Config {
    let mut rp_config = embassy_rp::i2c::Config::default();
    rp_config.frequency = config.frequency;
    rp_config
}

/// Adapter from `embedded-hal` I2C to [`I2cBus`]
pub struct I2cAdapter<I> {
    i2c: I,
}

impl<I: I2c> I2cAdapter<I> {
    /// Wrap a blocking I2C master
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Unwrap the I2C master
    pub fn into_inner(self) -> I {
        self.i2c
    }
}

impl<I: I2c> I2cBus for I2cAdapter<I> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c
            .write(address, data)
            .map_err(|e| bus_error(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.read(address, buf).map_err(|e| bus_error(e.kind()))
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c
            .write_read(address, write_data, read_buf)
            .map_err(|e| bus_error(e.kind()))
    }
}
