//! Real-time clock trait

use crate::bcd::BcdError;
use crate::time::{TimeFieldError, TimeOfDay};

/// Errors from RTC time transfers
///
/// `E` is the error type of the underlying bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError<E> {
    /// Bus transaction failed (no acknowledge, short transfer, ...)
    TransportFailure(E),
    /// A time register held bad BCD or an out-of-range value
    MalformedRegisterData {
        /// Register address
        register: u8,
        /// Raw byte as read from the chip
        raw: u8,
    },
    /// Time to be written is out of range
    InvalidArgument,
}

impl<E> RtcError<E> {
    /// Check if the failure happened on the bus rather than in the data
    pub fn is_transport(&self) -> bool {
        matches!(self, RtcError::TransportFailure(_))
    }

    /// Map a codec failure on `register` into an RTC error
    pub fn from_bcd(register: u8, err: BcdError) -> Self {
        match err {
            BcdError::Malformed(raw) => RtcError::MalformedRegisterData { register, raw },
            BcdError::InvalidArgument(_) => RtcError::InvalidArgument,
        }
    }
}

impl<E> From<TimeFieldError> for RtcError<E> {
    fn from(_: TimeFieldError) -> Self {
        RtcError::InvalidArgument
    }
}

/// Trait for battery-backed real-time clocks
///
/// Implementations transfer only the time-of-day registers.
pub trait RealTimeClock {
    /// Error type of the bus the chip sits on
    type BusError;

    /// Read the current time from the chip
    fn get_time(&mut self) -> Result<TimeOfDay, RtcError<Self::BusError>>;

    /// Write a new time to the chip
    ///
    /// Starts the oscillator if it was halted.
    fn set_time(&mut self, time: &TimeOfDay) -> Result<(), RtcError<Self::BusError>>;
}

impl<T: RealTimeClock + ?Sized> RealTimeClock for &mut T {
    type BusError = T::BusError;

    fn get_time(&mut self) -> Result<TimeOfDay, RtcError<Self::BusError>> {
        (**self).get_time()
    }

    fn set_time(&mut self, time: &TimeOfDay) -> Result<(), RtcError<Self::BusError>> {
        (**self).set_time(time)
    }
}
