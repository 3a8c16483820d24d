//! Build-time clock configuration
//!
//! `build.rs` validates `clock.toml` and generates the
//! [`CLOCK_CONFIG`] constant plus the `display_pins!` macro, which
//! picks the CLK and DIO pins out of the peripherals by name.

use segclock_core::config::{BootSync, ClockConfig, DisplayConfig, RtcConfig};
use segclock_core::traits::Brightness;
use segclock_core::{HourMode, TimeOfDay};

include!(concat!(env!("OUT_DIR"), "/clock_config.rs"));
