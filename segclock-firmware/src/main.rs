//! segclock - DS1307 desk clock firmware
//!
//! Main firmware binary for RP2040-based boards. Reads the time of day
//! from a DS1307 over I2C and shows HH:MM on a TM1637 4-digit display,
//! blinking the colon once per second.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Flex, Level, Output};
use embassy_rp::i2c::I2c;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use segclock_core::traits::ClockDisplay;
use segclock_drivers::display::Tm1637;
use segclock_drivers::rtc::Ds1307;
use segclock_hal_rp2040::{i2c_config, I2cAdapter, I2cConfig, OpenDrainPin, PushPullPin};

#[macro_use]
mod config;
mod boot;
mod tasks;

use crate::config::CLOCK_CONFIG;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("segclock firmware starting...");

    let p = embassy_rp::init(Default::default());
    let config = CLOCK_CONFIG;
    debug!("Config: {}", config);

    // RTC on I2C0: GPIO17 = SCL, GPIO16 = SDA
    let bus_config = i2c_config(I2cConfig::with_frequency(config.rtc.i2c_frequency_hz));
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_17, p.PIN_16, bus_config);
    let mut rtc = Ds1307::with_address(I2cAdapter::new(i2c), config.rtc.address)
        .with_hour_mode(config.rtc.hour_mode);
    info!(
        "RTC: DS1307 at 0x{:02X} ({})",
        rtc.address(),
        config.rtc.hour_mode
    );

    // Display: CLK push-pull, DIO open-drain with pull-up
    let (clk_pin, dio_pin) = display_pins!(p);
    let clk = PushPullPin::new(Output::new(clk_pin, Level::High));
    let dio = OpenDrainPin::new(Flex::new(dio_pin));
    let mut display =
        Tm1637::new(clk, dio, Delay).with_bit_delay(config.display.bit_delay_us);

    if let Err(e) = display.set_brightness(config.display.brightness) {
        warn!("Failed to set display brightness: {}", e);
    }
    info!("Display: TM1637, brightness {}", config.display.brightness);

    boot::sync_time(&mut rtc, &config);

    spawner
        .spawn(tasks::clock_task(rtc, display, config.refresh_interval_ms))
        .unwrap();

    info!("Clock running");
}
