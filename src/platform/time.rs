//! Fixed-step ticker
//!
//! Converts wall-clock time into a whole number of simulation ticks. The
//! simulation never re-arms itself; whoever owns the loop asks the ticker how
//! many ticks are due and runs exactly that many.

use std::time::Duration;

use crate::consts::{MAX_SUBSTEPS, TICK_MILLIS};

/// Elapsed time longer than this is treated as a stall and clamped
const MAX_FRAME: Duration = Duration::from_millis(100);

/// Accumulator-based fixed-step scheduler
#[derive(Debug, Clone)]
pub struct FixedTicker {
    step: Duration,
    max_substeps: u32,
    accumulator: Duration,
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_MILLIS), MAX_SUBSTEPS)
    }
}

impl FixedTicker {
    pub fn new(step: Duration, max_substeps: u32) -> Self {
        assert!(!step.is_zero(), "tick step must be non-zero");
        Self {
            step,
            max_substeps,
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Feed elapsed wall-clock time; returns how many ticks to run now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.min(MAX_FRAME);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        // Drop whatever could not be caught up
        if ticks == self.max_substeps && self.accumulator >= self.step {
            log::debug!("Ticker fell behind, dropping {:?}", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        ticks
    }

    /// Time until the next tick is due
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_ticks_only() {
        let mut ticker = FixedTicker::default();
        assert_eq!(ticker.advance(Duration::from_millis(10)), 0);
        assert_eq!(ticker.advance(Duration::from_millis(10)), 1); // 20ms -> 1, 4ms left
        assert_eq!(ticker.until_next(), Duration::from_millis(12));
        assert_eq!(ticker.advance(Duration::from_millis(28)), 2); // 32ms -> 2
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut ticker = FixedTicker::default();
        // 5 seconds of stall only yields the clamped 100ms worth (6 ticks)
        assert_eq!(ticker.advance(Duration::from_secs(5)), 6);
    }

    #[test]
    fn test_substep_cap() {
        let mut ticker = FixedTicker::new(Duration::from_millis(10), 3);
        assert_eq!(ticker.advance(Duration::from_millis(95)), 3);
        // Backlog dropped rather than carried
        assert_eq!(ticker.advance(Duration::from_millis(5)), 0);
    }
}
