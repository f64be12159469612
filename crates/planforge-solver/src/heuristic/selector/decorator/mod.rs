//! Composite and limiting selectors.
//!
//! - [`UnionMoveSelector`] - yields the moves of several children
//! - [`CartesianProductMoveSelector`] - yields one composite move per child combination
//! - [`SelectedCountLimitMoveSelector`] - caps the moves of its inner selector

mod cartesian_product;
mod count_limit;
mod union;

pub use cartesian_product::CartesianProductMoveSelector;
pub use count_limit::SelectedCountLimitMoveSelector;
pub use union::{SelectionProbabilityWeightFactory, UnionMoveSelector};
