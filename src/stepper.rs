use std::time::{Duration, Instant};

use log::trace;

use crate::game::GridState;

/// Fixed-timestep driver that decouples board speed from frame cadence.
///
/// Each frame adds the wall time since the previous frame to an accumulator
/// and drains it in whole steps. A stopped stepper has no frame scheduled
/// and never steps.
#[derive(Debug, Clone)]
pub struct Stepper {
    step: Duration,
    accumulator: Duration,
    last_frame: Option<Instant>,
}

impl Stepper {
    /// Creates a stopped stepper advancing once per `step`.
    #[must_use]
    pub fn new(step: Duration) -> Self {
        assert!(!step.is_zero(), "stepper interval must be positive");

        Self {
            step,
            accumulator: Duration::ZERO,
            last_frame: None,
        }
    }

    /// Schedules frames starting at `now` with an empty accumulator.
    pub fn start(&mut self, now: Instant) {
        self.last_frame = Some(now);
        self.accumulator = Duration::ZERO;
    }

    /// Cancels the frame schedule.
    pub fn stop(&mut self) {
        self.last_frame = None;
        self.accumulator = Duration::ZERO;
    }

    /// Returns true while frames are scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.last_frame.is_some()
    }

    /// Returns the fixed step interval.
    #[must_use]
    pub fn step_interval(&self) -> Duration {
        self.step
    }

    /// Runs every whole step that elapsed since the previous frame.
    ///
    /// Returns the number of steps taken; the remainder carries over.
    pub fn advance(&mut self, now: Instant, state: &mut GridState) -> usize {
        let Some(last_frame) = self.last_frame else {
            return 0;
        };

        self.accumulator += now.saturating_duration_since(last_frame);
        self.last_frame = Some(now);

        let mut steps = 0;
        while self.accumulator >= self.step {
            let outcome = state.step();
            trace!("step {steps}: {outcome:?}");
            self.accumulator -= self.step;
            steps += 1;
        }

        steps
    }
}
