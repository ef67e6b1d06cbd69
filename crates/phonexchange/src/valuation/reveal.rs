//! Count-up animation for the price reveal screen.
//!
//! Purely presentational: frames are derived from an already computed final
//! price and never feed back into the engine.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceReveal {
    target: u64,
    steps: u32,
    duration: Duration,
}

impl PriceReveal {
    pub const DEFAULT_STEPS: u32 = 60;
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

    pub fn new(target: u64) -> Self {
        Self {
            target,
            steps: Self::DEFAULT_STEPS,
            duration: Self::DEFAULT_DURATION,
        }
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Monotonic frame values; the last frame is always the target.
    pub fn frames(&self) -> Vec<u64> {
        if self.steps == 0 {
            return vec![self.target];
        }

        let steps = u128::from(self.steps);
        (1..=steps)
            .map(|step| (u128::from(self.target) * step / steps) as u64)
            .collect()
    }

    pub fn frame_interval(&self) -> Duration {
        if self.steps == 0 {
            Duration::ZERO
        } else {
            self.duration / self.steps
        }
    }
}
