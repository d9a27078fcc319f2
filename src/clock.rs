//! Frame pacing for the terminal loop.
//!
//! The engine counts time in whole milliseconds. The clock hands out only the
//! whole milliseconds that have passed and keeps the fraction for the next
//! tick, so the sum of ticks tracks wall time.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    period: Duration,
    last: Instant,
}

impl TickClock {
    pub fn new(period_ms: u32, now: Instant) -> Self {
        Self {
            period: Duration::from_millis(period_ms as u64),
            last: now,
        }
    }

    /// How long to wait for input before the next tick is due.
    pub fn until_next(&self, now: Instant) -> Duration {
        self.period.saturating_sub(now.saturating_duration_since(self.last))
    }

    /// Whole milliseconds to feed the engine, or `None` before a period has passed.
    pub fn advance(&mut self, now: Instant) -> Option<u32> {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < self.period {
            return None;
        }
        let ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
        self.last += Duration::from_millis(ms as u64);
        Some(ms)
    }
}
