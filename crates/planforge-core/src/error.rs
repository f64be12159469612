//! Error types for PlanForge

use thiserror::Error;

/// Main error type for PlanForge operations
#[derive(Debug, Error)]
pub enum PlanForgeError {
    /// Error in solver or selector configuration, with the offending path.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The greedy scan for an entity produced no candidate better than the sentinel.
    #[error("Initialization invariant violated for entity {entity_id}: {message}")]
    Initialization { entity_id: usize, message: String },

    /// A move would break chain well-formedness or pillar consistency.
    #[error("Structural invariant violated: {0}")]
    Structural(String),

    /// A single score evaluation failed; callers may skip the candidate.
    #[error("Score calculation error: {0}")]
    ScoreCalculation(String),

    /// Solving was cancelled before completion
    #[error("Solver was cancelled")]
    Cancelled,

    /// Invalid operation for current solver state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl PlanForgeError {
    /// Returns true for errors that only invalidate the current candidate.
    pub fn is_transient(&self) -> bool {
        matches!(self, PlanForgeError::ScoreCalculation(_))
    }
}

/// Result type alias for PlanForge operations
pub type Result<T> = std::result::Result<T, PlanForgeError>;
