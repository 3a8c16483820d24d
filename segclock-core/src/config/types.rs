//! Configuration type definitions

use crate::time::{HourMode, TimeOfDay};
use crate::traits::Brightness;

/// Default 7-bit address of the DS1307 family
pub const DEFAULT_RTC_ADDRESS: u8 = 0x68;

/// Default refresh interval (1 Hz)
pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 1000;

/// Default half-period of the display clock line
pub const DEFAULT_BIT_DELAY_US: u32 = 100;

/// What to do with the RTC time at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootSync {
    /// Never write the time at boot
    Never,
    /// Write the configured time only if the oscillator is halted
    #[default]
    IfHalted,
    /// Write the configured time on every boot
    Always,
}

impl BootSync {
    /// Decide whether the boot time should be written
    ///
    /// `halted` is `None` when the halt flag could not be read; the
    /// write is then attempted only for [`BootSync::Always`].
    pub const fn should_set(&self, halted: Option<bool>) -> bool {
        match self {
            BootSync::Never => false,
            BootSync::Always => true,
            BootSync::IfHalted => matches!(halted, Some(true)),
        }
    }
}

/// RTC chip configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Hours register format
    pub hour_mode: HourMode,
    /// I2C clock frequency in Hz
    pub i2c_frequency_hz: u32,
}

impl RtcConfig {
    pub const DEFAULT: Self = Self {
        address: DEFAULT_RTC_ADDRESS,
        hour_mode: HourMode::TwentyFourHour,
        i2c_frequency_hz: 100_000,
    };
}

impl Default for RtcConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Segment display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Brightness applied at startup
    pub brightness: Brightness,
    /// Clock line half-period in microseconds
    pub bit_delay_us: u32,
}

impl DisplayConfig {
    pub const DEFAULT: Self = Self {
        brightness: Brightness::MAX,
        bit_delay_us: DEFAULT_BIT_DELAY_US,
    };
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// RTC settings
    pub rtc: RtcConfig,
    /// Display settings
    pub display: DisplayConfig,
    /// Time between read-then-display cycles
    pub refresh_interval_ms: u32,
    /// Boot-time synchronisation policy
    pub boot_sync: BootSync,
    /// Time written at boot when `boot_sync` calls for it
    pub boot_time: TimeOfDay,
}

impl ClockConfig {
    pub const DEFAULT: Self = Self {
        rtc: RtcConfig::DEFAULT,
        display: DisplayConfig::DEFAULT,
        refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
        boot_sync: BootSync::IfHalted,
        boot_time: TimeOfDay {
            hours: 0,
            minutes: 6,
            seconds: 30,
        },
    };
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClockConfig::default();
        assert_eq!(config.rtc.address, 0x68);
        assert_eq!(config.rtc.hour_mode, HourMode::TwentyFourHour);
        assert_eq!(config.display.brightness, Brightness::MAX);
        assert_eq!(config.refresh_interval_ms, 1000);
        assert!(config.boot_time.validate().is_ok());
    }

    #[test]
    fn test_boot_sync_policy() {
        assert!(!BootSync::Never.should_set(Some(true)));
        assert!(BootSync::Always.should_set(Some(false)));
        assert!(BootSync::Always.should_set(None));
        assert!(BootSync::IfHalted.should_set(Some(true)));
        assert!(!BootSync::IfHalted.should_set(Some(false)));
        assert!(!BootSync::IfHalted.should_set(None));
    }
}
