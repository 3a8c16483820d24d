//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware builds a
//! [`ClockConfig`] from `clock.toml` at compile time.

pub mod types;

pub use types::*;
