//! The score oracle and its three implementations.

mod simple;
mod traits;

pub mod incremental;
pub mod recording;

#[cfg(test)]
mod tests;

pub use incremental::{IncrementalScoreCalculator, IncrementalScoreDirector};
pub use recording::RecordingScoreDirector;
pub use simple::SimpleScoreDirector;
pub use traits::ScoreDirector;
