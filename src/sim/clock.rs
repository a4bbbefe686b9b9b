//! Fixed timestep clock
//!
//! Turns variable host frame deltas into whole scheduler ticks.

use crate::consts::MAX_SUBSTEPS;

/// Longest frame delta honoured; longer gaps (tab switch) are dropped
const MAX_FRAME_MS: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct TickClock {
    interval_ms: f64,
    accumulator: f64,
}

impl TickClock {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: f64::from(interval_ms.max(1)),
            accumulator: 0.0,
        }
    }

    /// Feed one frame's elapsed time; returns how many ticks are due
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        self.accumulator += dt_ms.clamp(0.0, MAX_FRAME_MS);

        let mut ticks = 0;
        while self.accumulator >= self.interval_ms && ticks < MAX_SUBSTEPS {
            self.accumulator -= self.interval_ms;
            ticks += 1;
        }
        ticks
    }
}
