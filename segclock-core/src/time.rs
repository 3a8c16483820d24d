//! Time-of-day value type

/// Seconds in one day
pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Which field of a [`TimeOfDay`] is out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeField {
    Seconds,
    Minutes,
    Hours,
}

/// A field value outside its valid range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeFieldError {
    /// Offending field
    pub field: TimeField,
    /// Rejected value
    pub value: u8,
}

/// Wall-clock time of day, 24-hour
///
/// Holds only the three time-keeping fields; calendar fields are never
/// read from or written to the RTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    /// 0-23
    pub hours: u8,
    /// 0-59
    pub minutes: u8,
    /// 0-59
    pub seconds: u8,
}

impl TimeOfDay {
    /// 00:00:00
    pub const MIDNIGHT: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Create a validated time of day
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Result<Self, TimeFieldError> {
        let time = Self {
            hours,
            minutes,
            seconds,
        };
        match time.validate() {
            Ok(()) => Ok(time),
            Err(e) => Err(e),
        }
    }

    /// Check every field against its range
    pub const fn validate(&self) -> Result<(), TimeFieldError> {
        if self.seconds > 59 {
            return Err(TimeFieldError {
                field: TimeField::Seconds,
                value: self.seconds,
            });
        }
        if self.minutes > 59 {
            return Err(TimeFieldError {
                field: TimeField::Minutes,
                value: self.minutes,
            });
        }
        if self.hours > 23 {
            return Err(TimeFieldError {
                field: TimeField::Hours,
                value: self.hours,
            });
        }
        Ok(())
    }

    /// Value shown on a 4-digit display: `hours * 100 + minutes`
    ///
    /// 00:06 becomes 6, 23:59 becomes 2359.
    pub const fn display_value(&self) -> u16 {
        self.hours as u16 * 100 + self.minutes as u16
    }

    /// Colon is lit on even seconds, so it blinks at 0.5 Hz
    pub const fn colon_visible(&self) -> bool {
        self.seconds % 2 == 0
    }

    /// Seconds elapsed since midnight
    pub const fn seconds_since_midnight(&self) -> u32 {
        self.hours as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32
    }

    /// Build from seconds since midnight, wrapping at 24 hours
    pub const fn from_seconds_since_midnight(secs: u32) -> Self {
        let secs = secs % SECONDS_PER_DAY;
        Self {
            hours: (secs / 3600) as u8,
            minutes: ((secs / 60) % 60) as u8,
            seconds: (secs % 60) as u8,
        }
    }

    /// Time after `secs` more seconds have elapsed, wrapping at midnight
    pub const fn advance(&self, secs: u32) -> Self {
        let now = self.seconds_since_midnight() as u64;
        let later = (now + secs as u64) % SECONDS_PER_DAY as u64;
        Self::from_seconds_since_midnight(later as u32)
    }

    /// Hour on a 12-hour dial (1-12) and whether it is PM
    pub const fn to_12_hour(&self) -> (u8, bool) {
        let pm = self.hours >= 12;
        let hour = match self.hours % 12 {
            0 => 12,
            h => h,
        };
        (hour, pm)
    }

    /// Convert a 12-hour dial reading (1-12 plus PM flag) to 0-23
    ///
    /// Returns `None` for hours outside 1-12.
    pub const fn hours_from_12(hour: u8, pm: bool) -> Option<u8> {
        if hour == 0 || hour > 12 {
            return None;
        }
        let base = if hour == 12 { 0 } else { hour };
        Some(if pm { base + 12 } else { base })
    }
}

/// Hours register format of the RTC chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourMode {
    /// 0-23, bit 6 of the hours register clear
    #[default]
    TwentyFourHour,
    /// 1-12 with an AM/PM bit, bit 6 of the hours register set
    TwelveHour,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_ranges() {
        assert!(TimeOfDay::new(23, 59, 59).is_ok());
        assert_eq!(
            TimeOfDay::new(24, 0, 0),
            Err(TimeFieldError {
                field: TimeField::Hours,
                value: 24
            })
        );
        assert_eq!(
            TimeOfDay::new(0, 60, 0).unwrap_err().field,
            TimeField::Minutes
        );
        assert_eq!(
            TimeOfDay::new(0, 0, 60).unwrap_err().field,
            TimeField::Seconds
        );
    }

    #[test]
    fn test_display_value() {
        let t = TimeOfDay::new(0, 6, 30).unwrap();
        assert_eq!(t.display_value(), 6);

        let t = TimeOfDay::new(23, 59, 0).unwrap();
        assert_eq!(t.display_value(), 2359);
    }

    #[test]
    fn test_colon_blinks_with_seconds() {
        let t = TimeOfDay::new(0, 6, 32).unwrap();
        assert!(t.colon_visible());
        assert!(!t.advance(1).colon_visible());
        assert!(t.advance(2).colon_visible());
    }

    #[test]
    fn test_advance_wraps_at_midnight() {
        let t = TimeOfDay::new(23, 59, 58).unwrap();
        assert_eq!(t.advance(2), TimeOfDay::MIDNIGHT);
        assert_eq!(t.advance(3), TimeOfDay::new(0, 0, 1).unwrap());
        assert_eq!(t.advance(SECONDS_PER_DAY), t);
    }

    #[test]
    fn test_12_hour_conversion() {
        assert_eq!(TimeOfDay::MIDNIGHT.to_12_hour(), (12, false));
        assert_eq!(TimeOfDay::new(12, 0, 0).unwrap().to_12_hour(), (12, true));
        assert_eq!(TimeOfDay::new(13, 0, 0).unwrap().to_12_hour(), (1, true));
        assert_eq!(TimeOfDay::new(11, 0, 0).unwrap().to_12_hour(), (11, false));

        assert_eq!(TimeOfDay::hours_from_12(12, false), Some(0));
        assert_eq!(TimeOfDay::hours_from_12(12, true), Some(12));
        assert_eq!(TimeOfDay::hours_from_12(7, true), Some(19));
        assert_eq!(TimeOfDay::hours_from_12(0, false), None);
        assert_eq!(TimeOfDay::hours_from_12(13, true), None);
    }

    #[test]
    fn test_12_hour_roundtrip_all_hours() {
        for h in 0..24 {
            let t = TimeOfDay::new(h, 0, 0).unwrap();
            let (hour, pm) = t.to_12_hour();
            assert_eq!(TimeOfDay::hours_from_12(hour, pm), Some(h));
        }
    }
}
