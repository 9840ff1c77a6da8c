//! One-second tick source.
//!
//! The clock is a plain value owned by the engine. Arming and disarming are
//! synchronous flag flips; the underlying [`Interval`] is only created when a
//! tick is first awaited, and dropped on disarm, so a pending tick can never
//! survive a pause or reset.

use std::future;

use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// Period between ticks while armed.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Armable periodic tick generator.
#[derive(Debug, Default)]
pub struct Clock {
    armed: bool,
    ticker: Option<Interval>,
}

impl Clock {
    /// Creates a disarmed clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the clock. Re-arming an armed clock keeps the current schedule.
    pub fn arm(&mut self) {
        if self.armed {
            return;
        }
        self.armed = true;
        self.ticker = None;
    }

    /// Disarms the clock and drops any scheduled tick.
    pub fn disarm(&mut self) {
        self.armed = false;
        self.ticker = None;
    }

    /// Returns true while ticks are being generated.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Waits for the next tick.
    ///
    /// Never resolves while disarmed. The first tick arrives one full period
    /// after the clock is first polled following `arm()`. Cancel safe.
    pub async fn tick(&mut self) {
        if !self.armed {
            future::pending::<()>().await;
        }
        let ticker = self.ticker.get_or_insert_with(|| {
            let mut ticker = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker
        });
        ticker.tick().await;
    }
}
