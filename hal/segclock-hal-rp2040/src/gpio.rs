//! GPIO pins for RP2040
//!
//! Implements the `segclock-hal` pin traits on embassy-rp pins. The
//! RP2040 has no hardware open-drain mode, so open-drain lines are
//! emulated by switching the pin between driven-low output and
//! pulled-up input.

use embassy_rp::gpio::{Flex, Output, Pull};
use segclock_hal::{InputPin, OutputPin};

/// Push-pull output
pub struct PushPullPin<'d> {
    pin: Output<'d>,
}

impl<'d> PushPullPin<'d> {
    /// Wrap an output pin
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for PushPullPin<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Emulated open-drain pin with pull-up
///
/// `set_high` releases the line; the pull-up (or a device) decides the
/// level read back by `is_high`.
pub struct OpenDrainPin<'d> {
    pin: Flex<'d>,
    released: bool,
}

impl<'d> OpenDrainPin<'d> {
    /// Configure a flex pin as a released open-drain line
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_pull(Pull::Up);
        pin.set_low();
        pin.set_as_input();
        Self {
            pin,
            released: true,
        }
    }
}

impl OutputPin for OpenDrainPin<'_> {
    fn set_high(&mut self) {
        self.pin.set_as_input();
        self.released = true;
    }

    fn set_low(&mut self) {
        self.pin.set_low();
        self.pin.set_as_output();
        self.released = false;
    }

    fn is_set_high(&self) -> bool {
        self.released
    }
}

impl InputPin for OpenDrainPin<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
