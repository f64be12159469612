//! External termination via a shared AtomicBool flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::Termination;
use crate::scope::PhaseScope;

/// Terminates when an external flag is set.
///
/// Clones share the flag, so one clone can be handed to the phase and
/// another kept by the caller.
///
/// # Example
///
/// ```
/// use planforge_solver::termination::ExternalTermination;
///
/// let termination = ExternalTermination::new();
/// let handle = termination.clone();
///
/// // From another thread:
/// handle.terminate();
/// assert!(termination.is_requested());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExternalTermination {
    flag: Arc<AtomicBool>,
}

impl ExternalTermination {
    /// Creates a termination with an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a termination watching an existing flag.
    pub fn from_flag(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    /// Requests termination.
    pub fn terminate(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn flag(&self) -> &Arc<AtomicBool> {
        &self.flag
    }
}

impl Termination for ExternalTermination {
    fn is_terminated(&self, _phase_scope: &PhaseScope) -> bool {
        self.is_requested()
    }
}
