//! Heuristic components for solving
//!
//! This module contains:
//! - Moves: Operations that modify planning variables
//! - Selectors: Components that enumerate moves, alone or as composite trees

pub mod r#move;
pub mod selector;

// Re-export move types
pub use r#move::{
    ChainRestoreMove, ChangeMove, CompositeMove, GenericMove, Move, PillarChangeMove,
    PillarSwapMove, SubChainChangeMove, SubChainSwapMove, SwapMove, TailChainSwapMove,
};

// Re-export selector types
pub use selector::{
    CartesianProductMoveSelector, ChangeMoveSelector, MoveIteratorFactory,
    MoveIteratorFactorySelector, MoveListFactory, MoveListFactorySelector, MoveSelector,
    MoveSelectorNode, Pillar, PillarChangeMoveSelector, PillarSelector, PillarSwapMoveSelector,
    SelectedCountLimitMoveSelector, SelectionOrder, SelectionProbabilityWeightFactory,
    SelectorRng, SubChainChangeMoveSelector, SubChainSizes, SubChainSwapMoveSelector,
    SubPillarConfig, SwapMoveSelector, TailChainSwapMoveSelector, UnionMoveSelector,
};
