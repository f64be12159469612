//! Phase-level scope.

use std::time::{Duration, Instant};

/// Progress of a running phase, as seen by terminations.
///
/// For the construction initializer a step is one committed entity.
#[derive(Debug, Clone)]
pub struct PhaseScope {
    phase_index: usize,
    steps: u64,
    started: Instant,
}

impl PhaseScope {
    pub fn new(phase_index: usize) -> Self {
        Self {
            phase_index,
            steps: 0,
            started: Instant::now(),
        }
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Records a finished step and returns the new count.
    pub fn increment_step_count(&mut self) -> u64 {
        self.steps += 1;
        self.steps
    }
}
