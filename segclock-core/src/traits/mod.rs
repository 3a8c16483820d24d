//! Hardware abstraction traits
//!
//! These traits define the interface between the clock logic
//! and hardware-specific drivers.

pub mod display;
pub mod rtc;

pub use display::{Brightness, ClockDisplay, DisplayError};
pub use rtc::{RealTimeClock, RtcError};
