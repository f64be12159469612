//! PlanForge Core - Core types and traits for planning
//!
//! This crate provides the fundamental abstractions for PlanForge:
//! - Score types for representing solution quality
//! - Domain traits and typed variable accessors for planning problems
//! - The error taxonomy shared by every crate

pub mod domain;
pub mod error;
pub mod score;

pub use domain::{DemandSolution, PlanningId, PlanningSolution};
pub use error::{PlanForgeError, Result};
pub use score::{
    BendableScore, HardMediumSoftScore, HardSoftScore, ParseableScore, Score, ScoreLevel,
    ScoreParseError,
};
