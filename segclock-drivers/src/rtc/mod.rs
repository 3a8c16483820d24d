//! Real-time clock drivers

pub mod ds1307;

#[cfg(test)]
pub(crate) mod sim;

pub use ds1307::{Ds1307, DS1307_ADDRESS};
