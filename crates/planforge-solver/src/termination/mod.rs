//! Termination conditions for solver phases.
//!
//! Terminations are polled between steps, never within one.

mod external;
mod step_count;
mod time;

use std::fmt::Debug;

use planforge_config::TerminationConfig;

use crate::scope::PhaseScope;

pub use external::ExternalTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop a phase.
pub trait Termination: Send + Debug {
    /// Returns true if the phase should stop before its next step.
    fn is_terminated(&self, phase_scope: &PhaseScope) -> bool;
}

impl<T: Termination + ?Sized> Termination for Box<T> {
    fn is_terminated(&self, phase_scope: &PhaseScope) -> bool {
        (**self).is_terminated(phase_scope)
    }
}

/// Terminates when any of its terminations does.
#[derive(Debug, Default)]
pub struct AnyTermination {
    terminations: Vec<Box<dyn Termination>>,
}

impl AnyTermination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the terminations a [`TerminationConfig`] describes.
    pub fn from_config(config: &TerminationConfig) -> Self {
        let mut any = Self::new();
        if let Some(time) = TimeTermination::from_config(config) {
            any.push(time);
        }
        if let Some(limit) = config.step_count_limit {
            any.push(StepCountTermination::new(limit));
        }
        any
    }

    pub fn with(mut self, termination: impl Termination + 'static) -> Self {
        self.push(termination);
        self
    }

    pub fn push(&mut self, termination: impl Termination + 'static) {
        self.terminations.push(Box::new(termination));
    }

    pub fn len(&self) -> usize {
        self.terminations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terminations.is_empty()
    }
}

impl Termination for AnyTermination {
    fn is_terminated(&self, phase_scope: &PhaseScope) -> bool {
        self.terminations
            .iter()
            .any(|termination| termination.is_terminated(phase_scope))
    }
}
