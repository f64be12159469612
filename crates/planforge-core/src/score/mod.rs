//! Multi-level scores.
//!
//! Every score is a fixed number of `i64` levels, most significant first,
//! compared lexicographically. The planning engine only ever maximizes:
//! constraint weights are expressed as negative levels.

#[macro_use]
mod macros;

mod bendable;
mod hard_medium_soft;
mod hard_soft;
mod traits;

#[cfg(test)]
mod tests;

pub use bendable::BendableScore;
pub use hard_medium_soft::HardMediumSoftScore;
pub use hard_soft::HardSoftScore;
pub use traits::{ParseableScore, Score, ScoreParseError};

/// What a score level means for feasibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreLevel {
    /// A negative value makes the solution infeasible.
    Hard,
    /// Ranked below hard and above soft.
    Medium,
    /// Preference only.
    Soft,
}
