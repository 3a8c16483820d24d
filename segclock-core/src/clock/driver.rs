//! Read-then-display cycle with interval gating
//!
//! The driver is polled with a monotonic millisecond counter. Once per
//! interval it reads the RTC and forwards the time to the display. A failed
//! read leaves the display untouched, so the last good time stays visible
//! until the next successful cycle.

use crate::time::TimeOfDay;
use crate::traits::{ClockDisplay, DisplayError, RealTimeClock, RtcError};

/// Result of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome<E> {
    /// Interval has not elapsed yet
    Idle,
    /// Time read and shown
    Updated(TimeOfDay),
    /// RTC read failed, display left as it was
    SkippedRead(RtcError<E>),
    /// Time read but the display rejected the update
    DisplayFailed(TimeOfDay, DisplayError),
}

/// Running counters of cycle results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleStats {
    /// Cycles that updated the display
    pub updated: u32,
    /// Cycles skipped because the RTC read failed
    pub skipped_reads: u32,
    /// Cycles where the display update failed
    pub display_failures: u32,
}

/// Periodic clock driver state
pub struct ClockDriver {
    /// Counter value at the last triggered cycle
    previous_millis: u32,
    /// Time between cycles
    interval_ms: u32,
    /// Last successfully read time
    current: Option<TimeOfDay>,
    stats: CycleStats,
}

impl ClockDriver {
    /// Create a driver that runs a cycle every `interval_ms`
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            previous_millis: 0,
            interval_ms,
            current: None,
            stats: CycleStats {
                updated: 0,
                skipped_reads: 0,
                display_failures: 0,
            },
        }
    }

    /// Refresh interval in milliseconds
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Last successfully read time, if any
    pub fn current(&self) -> Option<TimeOfDay> {
        self.current
    }

    /// Cycle counters
    pub fn stats(&self) -> CycleStats {
        self.stats
    }

    /// Check whether a cycle is due at `now_ms`
    ///
    /// Uses wrapping arithmetic so a 32-bit counter rollover (every ~49 days)
    /// does not stall the clock.
    pub fn is_due(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.previous_millis) >= self.interval_ms
    }

    /// Restart the interval at `now_ms`
    pub fn reset(&mut self, now_ms: u32) {
        self.previous_millis = now_ms;
    }

    /// Run a cycle if one is due
    pub fn poll<R, D>(&mut self, now_ms: u32, rtc: &mut R, display: &mut D) -> CycleOutcome<R::BusError>
    where
        R: RealTimeClock,
        D: ClockDisplay,
    {
        if !self.is_due(now_ms) {
            return CycleOutcome::Idle;
        }
        self.previous_millis = now_ms;
        self.run_cycle(rtc, display)
    }

    /// Read the RTC and update the display, ignoring the interval
    pub fn run_cycle<R, D>(&mut self, rtc: &mut R, display: &mut D) -> CycleOutcome<R::BusError>
    where
        R: RealTimeClock,
        D: ClockDisplay,
    {
        let time = match rtc.get_time() {
            Ok(time) => time,
            Err(e) => {
                self.stats.skipped_reads = self.stats.skipped_reads.wrapping_add(1);
                return CycleOutcome::SkippedRead(e);
            }
        };

        self.current = Some(time);

        match display.show_time(time.display_value(), time.colon_visible()) {
            Ok(()) => {
                self.stats.updated = self.stats.updated.wrapping_add(1);
                CycleOutcome::Updated(time)
            }
            Err(e) => {
                self.stats.display_failures = self.stats.display_failures.wrapping_add(1);
                CycleOutcome::DisplayFailed(time, e)
            }
        }
    }
}

impl Default for ClockDriver {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_REFRESH_INTERVAL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Brightness;

    /// RTC that replays a fixed time, or fails on demand
    struct MockRtc {
        time: TimeOfDay,
        fail: bool,
        reads: u32,
    }

    impl MockRtc {
        fn new(time: TimeOfDay) -> Self {
            Self {
                time,
                fail: false,
                reads: 0,
            }
        }
    }

    impl RealTimeClock for MockRtc {
        type BusError = ();

        fn get_time(&mut self) -> Result<TimeOfDay, RtcError<()>> {
            self.reads += 1;
            if self.fail {
                Err(RtcError::TransportFailure(()))
            } else {
                Ok(self.time)
            }
        }

        fn set_time(&mut self, time: &TimeOfDay) -> Result<(), RtcError<()>> {
            self.time = *time;
            Ok(())
        }
    }

    /// Display that records the last value shown
    #[derive(Default)]
    struct MockDisplay {
        shown: Option<(u16, bool)>,
        updates: u32,
        fail: bool,
    }

    impl ClockDisplay for MockDisplay {
        fn set_brightness(&mut self, _brightness: Brightness) -> Result<(), DisplayError> {
            Ok(())
        }

        fn show_time(&mut self, value: u16, colon: bool) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            self.shown = Some((value, colon));
            self.updates += 1;
            Ok(())
        }
    }

    fn time(h: u8, m: u8, s: u8) -> TimeOfDay {
        TimeOfDay::new(h, m, s).unwrap()
    }

    #[test]
    fn test_gate_fires_once_per_interval() {
        let mut driver = ClockDriver::new(1000);
        let mut rtc = MockRtc::new(time(12, 34, 56));
        let mut display = MockDisplay::default();

        assert_eq!(driver.poll(0, &mut rtc, &mut display), CycleOutcome::Idle);
        assert_eq!(driver.poll(999, &mut rtc, &mut display), CycleOutcome::Idle);
        assert_eq!(
            driver.poll(1000, &mut rtc, &mut display),
            CycleOutcome::Updated(time(12, 34, 56))
        );
        assert_eq!(driver.poll(1500, &mut rtc, &mut display), CycleOutcome::Idle);
        assert!(matches!(
            driver.poll(2000, &mut rtc, &mut display),
            CycleOutcome::Updated(_)
        ));
        assert_eq!(rtc.reads, 2);
        assert_eq!(display.shown, Some((1234, true)));
    }

    #[test]
    fn test_gate_survives_counter_wrap() {
        let mut driver = ClockDriver::new(1000);
        driver.reset(u32::MAX - 200);

        assert!(!driver.is_due(u32::MAX));
        assert!(!driver.is_due(798));
        assert!(driver.is_due(799));
    }

    #[test]
    fn test_failed_read_keeps_display() {
        let mut driver = ClockDriver::new(1000);
        let mut rtc = MockRtc::new(time(0, 6, 30));
        let mut display = MockDisplay::default();

        assert!(matches!(
            driver.run_cycle(&mut rtc, &mut display),
            CycleOutcome::Updated(_)
        ));
        assert_eq!(display.shown, Some((6, true)));

        rtc.fail = true;
        rtc.time = time(9, 0, 1);
        assert_eq!(
            driver.poll(1000, &mut rtc, &mut display),
            CycleOutcome::SkippedRead(RtcError::TransportFailure(()))
        );

        // Stale value persists, nothing written
        assert_eq!(display.shown, Some((6, true)));
        assert_eq!(display.updates, 1);
        assert_eq!(driver.current(), Some(time(0, 6, 30)));

        // Next tick recovers
        rtc.fail = false;
        assert_eq!(
            driver.poll(2000, &mut rtc, &mut display),
            CycleOutcome::Updated(time(9, 0, 1))
        );
        assert_eq!(display.shown, Some((900, false)));

        let stats = driver.stats();
        assert_eq!(stats.updated, 2);
        assert_eq!(stats.skipped_reads, 1);
    }

    #[test]
    fn test_display_failure_reported() {
        let mut driver = ClockDriver::new(1000);
        let mut rtc = MockRtc::new(time(1, 2, 3));
        let mut display = MockDisplay {
            fail: true,
            ..Default::default()
        };

        assert_eq!(
            driver.run_cycle(&mut rtc, &mut display),
            CycleOutcome::DisplayFailed(time(1, 2, 3), DisplayError::Communication)
        );
        assert_eq!(driver.current(), Some(time(1, 2, 3)));
        assert_eq!(driver.stats().display_failures, 1);
    }
}
