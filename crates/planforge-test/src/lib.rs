//! Shared test fixtures for PlanForge crates.
//!
//! This crate provides data types and pure functions for testing.
//! It does NOT depend on `planforge-scoring` to avoid circular dependencies.
//!
//! - [`roster`] - Nurse rostering demand solution for the initializer
//! - [`routing`] - Chained routing solution for chain moves
//! - [`task`] - Task list with a basic planning variable
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! planforge-test = { workspace = true }
//! ```

pub mod roster;
pub mod routing;
pub mod task;

pub use roster::{Employee, NurseRoster, Shift, ShiftAssignment, ShiftKind};
pub use routing::{RoutingSolution, Visit};
pub use task::{Task, TaskSolution};
