//! Solver phases.
//!
//! - [`ConstructionInitializer`](construction::ConstructionInitializer):
//!   builds the first complete solution from an empty entity list

pub mod construction;
