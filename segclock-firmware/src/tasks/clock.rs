//! Clock task
//!
//! Polls the [`ClockDriver`] on a short ticker. The driver decides when
//! a refresh interval has elapsed and runs the read-then-display cycle.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Duration, Instant, Ticker};

use segclock_core::clock::{ClockDriver, CycleOutcome};
use segclock_drivers::display::Tm1637;
use segclock_drivers::rtc::Ds1307;
use segclock_hal_rp2040::{I2cAdapter, I2cBusError, OpenDrainPin, PushPullPin};

/// Ticker period; bounds the jitter of each refresh
pub const POLL_INTERVAL_MS: u64 = 50;

/// DS1307 on I2C0
pub type BoardRtc = Ds1307<I2cAdapter<I2c<'static, I2C0, Blocking>>>;

/// TM1637 on two GPIOs
pub type BoardDisplay = Tm1637<PushPullPin<'static>, OpenDrainPin<'static>, Delay>;

/// Clock task - reads the RTC and refreshes the display once per interval
#[embassy_executor::task]
pub async fn clock_task(mut rtc: BoardRtc, mut display: BoardDisplay, interval_ms: u32) {
    info!("Clock task started ({} ms interval)", interval_ms);

    let mut driver = ClockDriver::new(interval_ms);

    // Show the time right away rather than after the first interval
    report(driver.run_cycle(&mut rtc, &mut display));
    driver.reset(now_ms());

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;

        let outcome = driver.poll(now_ms(), &mut rtc, &mut display);
        report(outcome);

        let stats = driver.stats();
        if matches!(outcome, CycleOutcome::SkippedRead(_)) && stats.skipped_reads % 60 == 0 {
            warn!("RTC unreachable: {}", stats);
        }
    }
}

/// Milliseconds since boot, wrapping at 2^32
fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

fn report(outcome: CycleOutcome<I2cBusError>) {
    match outcome {
        CycleOutcome::Idle => {}
        CycleOutcome::Updated(time) => {
            debug!(
                "Hours:{} Minutes:{} Seconds:{}",
                time.hours, time.minutes, time.seconds
            );
        }
        CycleOutcome::SkippedRead(e) => {
            warn!("RTC read failed, display unchanged: {}", e);
        }
        CycleOutcome::DisplayFailed(time, e) => {
            warn!("Display update failed at {}: {}", time, e);
        }
    }
}
