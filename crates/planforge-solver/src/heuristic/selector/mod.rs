//! Move selectors.
//!
//! A selector enumerates the moves a local search step considers. Leaf
//! selectors generate moves for one kind of planning variable; composites
//! ([`UnionMoveSelector`], [`CartesianProductMoveSelector`]) combine
//! children, and [`MoveSelectorNode`] is the runtime tree built from
//! configuration.
//!
//! Every selector runs in [`SelectionOrder::Original`] (a finite,
//! deterministic pass) or [`SelectionOrder::Random`] (an unbounded,
//! seeded sequence).

mod change;
pub mod decorator;
pub mod factory;
mod node;
pub mod pillar;
mod random;
pub mod sub_chain;
mod swap;
mod tail_chain;
mod traits;

#[cfg(test)]
mod tests;

pub use change::ChangeMoveSelector;
pub use decorator::{
    CartesianProductMoveSelector, SelectedCountLimitMoveSelector,
    SelectionProbabilityWeightFactory, UnionMoveSelector,
};
pub use factory::{
    MoveIteratorFactory, MoveIteratorFactorySelector, MoveListFactory, MoveListFactorySelector,
};
pub use node::MoveSelectorNode;
pub use pillar::{
    Pillar, PillarChangeMoveSelector, PillarSelector, PillarSwapMoveSelector, SubPillarConfig,
};
pub use planforge_config::SelectionOrder;
pub use random::SelectorRng;
pub use sub_chain::{SubChainChangeMoveSelector, SubChainSizes, SubChainSwapMoveSelector};
pub use swap::SwapMoveSelector;
pub use tail_chain::TailChainSwapMoveSelector;
pub use traits::MoveSelector;
