//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in segclock-core:
//!
//! - Real-time clocks (DS1307 time registers over I2C)
//! - Segment displays (TM1637 4-digit, bit-banged two-wire)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod rtc;
