//! RP2040-specific HAL for the segclock firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `segclock-hal` traits:
//!
//! - I2C bus adapter over any `embedded-hal` 1.0 blocking I2C
//!   (used with `embassy_rp::i2c::I2c` in blocking mode)
//! - Push-pull and emulated open-drain GPIO pins

#![no_std]

pub mod gpio;
pub mod i2c;

pub use gpio::{OpenDrainPin, PushPullPin};
pub use i2c::{i2c_config, I2cAdapter};

// Re-export shared traits from segclock-hal for convenience
pub use segclock_hal::{I2cBus, I2cBusError, I2cConfig};
