//! Board-agnostic core logic for the segclock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - BCD codec used by the RTC time registers
//! - Time-of-day value type
//! - Hardware abstraction traits (real-time clock, segment display)
//! - Periodic clock driver (tick gating, read-then-display cycle)
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bcd;
pub mod clock;
pub mod config;
pub mod time;
pub mod traits;

pub use time::{HourMode, TimeOfDay};
