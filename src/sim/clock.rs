//! Fixed-period tick scheduling
//!
//! Frames arrive at whatever rate the host delivers them; the clock turns the
//! elapsed wall time into a count of whole tick periods. Ticks are always run
//! one after another by the caller, never concurrently.

use crate::consts::MAX_CATCHUP_TICKS;

/// Accumulator that converts frame time into due ticks
#[derive(Debug, Clone)]
pub struct TickClock {
    period_ms: f64,
    accumulator_ms: f64,
    running: bool,
}

impl TickClock {
    /// A stopped clock with the given period
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1) as f64,
            accumulator_ms: 0.0,
            running: false,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start a fresh tick stream, discarding anything left over from the
    /// previous one
    pub fn start(&mut self) {
        self.accumulator_ms = 0.0;
        self.running = true;
    }

    /// Stop ticking; `advance` reports nothing until `start` is called again
    pub fn stop(&mut self) {
        self.accumulator_ms = 0.0;
        self.running = false;
    }

    /// Feed elapsed frame time and return how many ticks are due.
    ///
    /// At most `MAX_CATCHUP_TICKS` are reported per call; a larger backlog
    /// (long frame, hidden tab) is dropped rather than replayed.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if !self.running || !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }

        self.accumulator_ms += elapsed_ms;
        let mut due = 0;
        while self.accumulator_ms >= self.period_ms && due < MAX_CATCHUP_TICKS {
            self.accumulator_ms -= self.period_ms;
            due += 1;
        }
        if self.accumulator_ms >= self.period_ms {
            log::debug!(
                "Dropping {:.0} ms of tick backlog",
                self.accumulator_ms - self.accumulator_ms % self.period_ms
            );
            self.accumulator_ms %= self.period_ms;
        }
        due
    }
}
