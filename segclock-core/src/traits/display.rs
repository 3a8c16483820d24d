//! Segment display trait

/// Errors that can occur when driving the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Display did not acknowledge a byte
    Communication,
    /// Value cannot be shown (too many digits, brightness above 15)
    InvalidValue,
}

/// Display brightness in the controller's native control nibble
///
/// Bits 0-2 select the pulse width (0-7), bit 3 switches the display on.
/// So 0x0F is full brightness and anything below 0x08 blanks the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Brightness {
    /// Display on, brightest setting
    pub const MAX: Self = Self(0x0F);

    /// Display on, dimmest setting
    pub const MIN: Self = Self(0x08);

    /// Display switched off
    pub const OFF: Self = Self(0x00);

    const DISPLAY_ON: u8 = 0x08;

    /// Create from a raw 0-15 control nibble
    pub const fn new(raw: u8) -> Result<Self, DisplayError> {
        if raw > 0x0F {
            return Err(DisplayError::InvalidValue);
        }
        Ok(Self(raw))
    }

    /// Create from a pulse-width level (0-7) and an on/off flag
    pub const fn from_level(level: u8, on: bool) -> Self {
        let on_bit = if on { Self::DISPLAY_ON } else { 0 };
        Self((level & 0x07) | on_bit)
    }

    /// Raw control nibble
    pub const fn raw(&self) -> u8 {
        self.0
    }

    /// Pulse-width level (0-7)
    pub const fn level(&self) -> u8 {
        self.0 & 0x07
    }

    /// Check if the display is switched on
    pub const fn is_on(&self) -> bool {
        self.0 & Self::DISPLAY_ON != 0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::MAX
    }
}

/// Trait for the clock's time display
pub trait ClockDisplay {
    /// Set brightness for subsequent updates
    fn set_brightness(&mut self, brightness: Brightness) -> Result<(), DisplayError>;

    /// Show a 4-digit value with leading zeros and the colon on or off
    ///
    /// - `value`: `hours * 100 + minutes` (0-9999)
    /// - `colon`: light the separator between the hour and minute digits
    fn show_time(&mut self, value: u16, colon: bool) -> Result<(), DisplayError>;
}

impl<T: ClockDisplay + ?Sized> ClockDisplay for &mut T {
    fn set_brightness(&mut self, brightness: Brightness) -> Result<(), DisplayError> {
        (**self).set_brightness(brightness)
    }

    fn show_time(&mut self, value: u16, colon: bool) -> Result<(), DisplayError> {
        (**self).show_time(value, colon)
    }
}
