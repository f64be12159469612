//! Step count termination.

use super::Termination;
use crate::scope::PhaseScope;

/// Stops a phase once it has taken `limit` steps.
///
/// ```
/// use planforge_solver::termination::StepCountTermination;
///
/// // At most 500 committed entities per construction phase.
/// let term = StepCountTermination::new(500);
/// assert_eq!(term.limit(), 500);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Termination for StepCountTermination {
    fn is_terminated(&self, phase_scope: &PhaseScope) -> bool {
        phase_scope.step_count() >= self.limit
    }
}
