//! TM1637 4-digit LED driver
//!
//! The TM1637 talks a two-wire protocol that looks like I2C but has no
//! device address and sends bits LSB first, so it is bit-banged on two
//! GPIOs:
//!
//! - CLK: push-pull output
//! - DIO: open-drain, released high between bytes so the chip can pull it
//!   low to acknowledge
//!
//! # Frames
//!
//! Every update is three frames, each wrapped in START/STOP:
//! - `0x40`: data command, auto-increment address
//! - `0xC0 + pos`, segment bytes: address command then digit data
//! - `0x80 | brightness`: display control

use embedded_hal::delay::DelayNs;
use segclock_core::traits::{Brightness, ClockDisplay, DisplayError};
use segclock_hal::{InputPin, OutputPin};

/// Number of digits on the module
pub const DIGITS: usize = 4;

/// Default half-period of CLK in microseconds
pub const DEFAULT_BIT_DELAY_US: u32 = 100;

/// Dot mask for the `00:00` colon (bit 7 of the second digit)
pub const COLON: u8 = 0b0100_0000;

/// Segment bit for the dot/colon on a digit
pub const SEG_DP: u8 = 0x80;

/// Command bytes
pub mod cmd {
    /// Data command: write, auto-increment address
    pub const DATA_AUTO_INCREMENT: u8 = 0x40;
    /// Address command, OR with the first digit position
    pub const ADDRESS: u8 = 0xC0;
    /// Display control, OR with the brightness nibble
    pub const DISPLAY_CONTROL: u8 = 0x80;
}

/// Segment patterns for hex digits 0-F
///
/// Bit 0 = segment A through bit 6 = segment G.
pub const DIGIT_SEGMENTS: [u8; 16] = [
    0x3F, // 0
    0x06, // 1
    0x5B, // 2
    0x4F, // 3
    0x66, // 4
    0x6D, // 5
    0x7D, // 6
    0x07, // 7
    0x7F, // 8
    0x6F, // 9
    0x77, // A
    0x7C, // b
    0x39, // C
    0x5E, // d
    0x79, // E
    0x71, // F
];

/// Segment pattern for a single hex digit
pub const fn encode_digit(digit: u8) -> u8 {
    DIGIT_SEGMENTS[(digit & 0x0F) as usize]
}

/// Render a decimal number into segment bytes
///
/// Digits are right-aligned. With `leading_zero` false, leading zeros are
/// blanked but the last digit is always shown. `dots` works left to right:
/// bit 7 lights the dot on digit 0, bit 6 on digit 1 and so on.
pub fn render_decimal(
    num: u16,
    dots: u8,
    leading_zero: bool,
) -> Result<[u8; DIGITS], DisplayError> {
    if num > 9999 {
        return Err(DisplayError::InvalidValue);
    }

    let mut segments = [0u8; DIGITS];
    let mut rest = num;
    for (i, segment) in segments.iter_mut().enumerate().rev() {
        let digit = (rest % 10) as u8;
        let blank = rest == 0 && !leading_zero && i < DIGITS - 1;
        *segment = if blank { 0 } else { encode_digit(digit) };
        rest /= 10;
    }

    let mut mask = dots;
    for segment in segments.iter_mut() {
        *segment |= mask & SEG_DP;
        mask <<= 1;
    }

    Ok(segments)
}

/// TM1637 driver
pub struct Tm1637<CLK, DIO, D> {
    clk: CLK,
    dio: DIO,
    delay: D,
    bit_delay_us: u32,
    brightness: Brightness,
}

impl<CLK, DIO, D> Tm1637<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: OutputPin + InputPin,
    D: DelayNs,
{
    /// Create a driver and idle both lines high
    pub fn new(clk: CLK, dio: DIO, delay: D) -> Self {
        let mut display = Self {
            clk,
            dio,
            delay,
            bit_delay_us: DEFAULT_BIT_DELAY_US,
            brightness: Brightness::MAX,
        };
        display.clk.set_high();
        display.dio.set_high();
        display
    }

    /// Change the CLK half-period
    pub fn with_bit_delay(mut self, bit_delay_us: u32) -> Self {
        self.bit_delay_us = bit_delay_us;
        self
    }

    /// Brightness sent with the next update
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    fn bit_delay(&mut self) {
        self.delay.delay_us(self.bit_delay_us);
    }

    /// DIO falls while CLK is high
    fn start(&mut self) {
        self.dio.set_low();
        self.bit_delay();
    }

    /// DIO rises while CLK is high
    fn stop(&mut self) {
        self.dio.set_low();
        self.bit_delay();
        self.clk.set_high();
        self.bit_delay();
        self.dio.set_high();
        self.bit_delay();
    }

    /// Clock out one byte LSB first and sample the ACK
    fn write_byte(&mut self, byte: u8) -> Result<(), DisplayError> {
        let mut data = byte;
        for _ in 0..8 {
            self.clk.set_low();
            self.bit_delay();
            self.dio.set_state(data & 0x01 != 0);
            self.bit_delay();
            self.clk.set_high();
            self.bit_delay();
            data >>= 1;
        }

        // Release DIO for the ninth clock; the chip pulls it low to ACK
        self.clk.set_low();
        self.dio.set_high();
        self.bit_delay();
        self.clk.set_high();
        self.bit_delay();

        let ack = self.dio.is_low();
        if ack {
            self.dio.set_low();
        }
        self.bit_delay();
        self.clk.set_low();
        self.bit_delay();

        if ack {
            Ok(())
        } else {
            Err(DisplayError::Communication)
        }
    }

    /// Send one START ... STOP frame
    ///
    /// STOP is always sent so the bus is left idle even after a NACK.
    fn send_frame(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.start();
        let result = bytes.iter().try_for_each(|&b| self.write_byte(b));
        self.stop();
        result
    }

    /// Write raw segment bytes starting at digit `pos`
    pub fn set_segments(&mut self, segments: &[u8], pos: u8) -> Result<(), DisplayError> {
        let pos = pos as usize;
        if pos + segments.len() > DIGITS {
            return Err(DisplayError::InvalidValue);
        }

        self.send_frame(&[cmd::DATA_AUTO_INCREMENT])?;

        let mut frame = [0u8; DIGITS + 1];
        frame[0] = cmd::ADDRESS + pos as u8;
        frame[1..=segments.len()].copy_from_slice(segments);
        self.send_frame(&frame[..=segments.len()])?;

        self.send_frame(&[cmd::DISPLAY_CONTROL | self.brightness.raw()])
    }

    /// Blank all digits
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.set_segments(&[0; DIGITS], 0)
    }

    /// Show a decimal number (0-9999) with a dot mask
    pub fn show_number_dec_ex(
        &mut self,
        num: u16,
        dots: u8,
        leading_zero: bool,
    ) -> Result<(), DisplayError> {
        let segments = render_decimal(num, dots, leading_zero)?;
        self.set_segments(&segments, 0)
    }

    /// Release the pins and delay
    pub fn release(self) -> (CLK, DIO, D) {
        (self.clk, self.dio, self.delay)
    }
}

impl<CLK, DIO, D> ClockDisplay for Tm1637<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: OutputPin + InputPin,
    D: DelayNs,
{
    fn set_brightness(&mut self, brightness: Brightness) -> Result<(), DisplayError> {
        // Sent with the display control frame of the next update
        self.brightness = brightness;
        Ok(())
    }

    fn show_time(&mut self, value: u16, colon: bool) -> Result<(), DisplayError> {
        let dots = if colon { COLON } else { 0 };
        self.show_number_dec_ex(value, dots, true)
    }
}
