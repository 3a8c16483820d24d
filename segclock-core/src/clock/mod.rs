//! Periodic clock driver
//!
//! Owns the timing state of the read-then-display loop and runs one
//! cycle per refresh interval.

pub mod driver;

pub use driver::{ClockDriver, CycleOutcome, CycleStats};
