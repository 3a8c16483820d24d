//! Boot-time RTC synchronisation
//!
//! A fresh DS1307 powers up with the oscillator halted. Depending on
//! the configured [`BootSync`] policy the firmware writes the boot time
//! from `clock.toml`, which also restarts the oscillator.
//!
//! [`BootSync`]: segclock_core::config::BootSync

use defmt::*;

use segclock_core::config::ClockConfig;
use segclock_core::traits::RealTimeClock;
use segclock_drivers::rtc::Ds1307;
use segclock_hal_rp2040::I2cBus;

/// Apply the boot sync policy to the RTC
pub fn sync_time<I2C>(rtc: &mut Ds1307<I2C>, config: &ClockConfig)
where
    I2C: I2cBus,
    I2C::Error: Format,
{
    let halted = match rtc.is_halted() {
        Ok(halted) => {
            if halted {
                warn!("RTC oscillator is halted");
            }
            Some(halted)
        }
        Err(e) => {
            warn!("Failed to read RTC halt flag: {}", e);
            None
        }
    };

    if !config.boot_sync.should_set(halted) {
        info!("Keeping RTC time ({})", config.boot_sync);
        return;
    }

    match rtc.set_time(&config.boot_time) {
        Ok(()) => info!("RTC set to {}", config.boot_time),
        Err(e) => error!("Failed to set RTC time: {}", e),
    }
}
