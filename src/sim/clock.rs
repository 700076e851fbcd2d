//! Fixed-timestep accumulator
//!
//! Converts wall-clock frame times into a whole number of fixed ticks. Time is
//! kept as `Duration` so whole multiples of the interval tick exactly.

use std::time::Duration;

use crate::consts::{MAX_CATCH_UP_TICKS, SIM_INTERVAL};

#[derive(Debug, Clone)]
pub struct SimClock {
    interval: Duration,
    max_ticks: u32,
    last_frame_time: Option<Duration>,
    left_over: Duration,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(SIM_INTERVAL, MAX_CATCH_UP_TICKS)
    }
}

impl SimClock {
    pub fn new(interval: Duration, max_ticks: u32) -> Self {
        Self {
            interval,
            max_ticks,
            last_frame_time: None,
            left_over: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time carried into the next frame
    pub fn left_over(&self) -> Duration {
        self.left_over
    }

    /// Forget the previous frame; the next `advance` only records its time
    pub fn reset(&mut self) {
        self.last_frame_time = None;
        self.left_over = Duration::ZERO;
    }

    /// Account for a frame at `now` and call `step` once per whole interval
    ///
    /// Catch-up is capped at `max_ticks`; time beyond the cap is dropped.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, now: Duration, mut step: impl FnMut(f32)) -> u32 {
        let Some(last) = self.last_frame_time.replace(now) else {
            return 0;
        };

        let cap = self.interval * self.max_ticks;
        let mut pending = (now.saturating_sub(last) + self.left_over).min(cap);

        let dt = self.interval.as_secs_f32();
        let mut ticks = 0;
        while pending >= self.interval {
            pending -= self.interval;
            step(dt);
            ticks += 1;
        }

        self.left_over = pending;
        ticks
    }
}
