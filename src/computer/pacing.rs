//! Pacing between computer steps.
//!
//! Purely cosmetic: a pacer decides how long to wait, never what to do.
//! Headless runs and tests use `NoPacing`.

use std::time::Duration;

use crate::core::AiSpeed;

/// Waits between two computer steps.
pub trait Pacer {
    /// Pause before the next step.
    fn pause(&mut self, speed: AiSpeed);
}

/// No delay at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&mut self, _speed: AiSpeed) {}
}

/// Blocks the calling thread for the speed's delay.
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepPacing;

impl Pacer for SleepPacing {
    fn pause(&mut self, speed: AiSpeed) {
        std::thread::sleep(speed.delay());
    }
}

/// Records requested delays without waiting.
#[derive(Clone, Debug, Default)]
pub struct RecordingPacer {
    pub pauses: Vec<Duration>,
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, speed: AiSpeed) {
        self.pauses.push(speed.delay());
    }
}

impl RecordingPacer {
    /// Total time the pauses would have taken.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.pauses.iter().sum()
    }
}
