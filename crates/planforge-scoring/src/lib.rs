//! Score directors for PlanForge.
//!
//! This crate provides the score oracle consumed by the solver:
//! - The [`ScoreDirector`] trait with change notifications
//! - Full recalculation ([`SimpleScoreDirector`])
//! - Incremental delta scoring ([`IncrementalScoreDirector`])
//! - Undo tracking for move evaluation ([`RecordingScoreDirector`])

pub mod director;

pub use director::{
    IncrementalScoreCalculator, IncrementalScoreDirector, RecordingScoreDirector, ScoreDirector,
    SimpleScoreDirector,
};
