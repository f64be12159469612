//! Per-phase bookkeeping shared with terminations.

mod phase;

pub use phase::PhaseScope;
