//! Wall-clock termination.

use std::time::Duration;

use planforge_config::TerminationConfig;

use super::Termination;
use crate::scope::PhaseScope;

/// Stops a phase once `limit` has elapsed since it started.
///
/// ```
/// use std::time::Duration;
/// use planforge_solver::termination::TimeTermination;
///
/// assert_eq!(TimeTermination::seconds(2).limit(), Duration::from_millis(2000));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Duration::from_millis(ms).into()
    }

    pub fn seconds(secs: u64) -> Self {
        Duration::from_secs(secs).into()
    }

    /// `None` when the config sets no positive time limit.
    pub fn from_config(config: &TerminationConfig) -> Option<Self> {
        config.time_limit().map(Self::from)
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl From<Duration> for TimeTermination {
    fn from(limit: Duration) -> Self {
        Self::new(limit)
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&self, phase_scope: &PhaseScope) -> bool {
        phase_scope.elapsed() >= self.limit
    }
}
