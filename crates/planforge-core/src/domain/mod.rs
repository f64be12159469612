//! Domain model traits and accessors for defining planning problems
//!
//! - `PlanningSolution`: The container for the complete problem and solution
//! - `PlanningId`: Stable identification for entities
//! - `DemandSolution`: Demand units expanded into entities by the initializer
//! - `BasicVariable` / `ChainedVariable`: Typed variable accessors
//! - `ChainIndex`: Validated view of chained variables

mod chain;
mod demand;
mod traits;
mod variable;

#[cfg(test)]
mod tests;

pub use chain::{link_before, ChainIndex, SubChain};
pub use demand::{initialization_order, DemandSolution, InitializationWeight};
pub use traits::{PlanningId, PlanningSolution};
pub use variable::{BasicVariable, ChainLink, ChainedVariable};
