//! PlanForge Solver Engine
//!
//! This crate provides:
//! - The construction heuristic initializer that builds a first solution
//! - Move system
//! - Move selectors, leaf and composite
//! - Termination conditions
//! - Configuration wiring (builder module)

pub mod builder;
pub mod heuristic;
pub mod phase;
pub mod scope;
pub mod termination;

pub use builder::{build_move_selector, build_phase_selectors, FactoryRegistry, SelectorContext};
pub use heuristic::{
    // Move types
    ChainRestoreMove,
    ChangeMove,
    CompositeMove,
    GenericMove,
    Move,
    PillarChangeMove,
    PillarSwapMove,
    SubChainChangeMove,
    SubChainSwapMove,
    SwapMove,
    TailChainSwapMove,
    // Selectors
    CartesianProductMoveSelector,
    ChangeMoveSelector,
    MoveIteratorFactory,
    MoveIteratorFactorySelector,
    MoveListFactory,
    MoveListFactorySelector,
    MoveSelector,
    MoveSelectorNode,
    PillarChangeMoveSelector,
    PillarSwapMoveSelector,
    SelectedCountLimitMoveSelector,
    SelectionOrder,
    SelectionProbabilityWeightFactory,
    SubChainChangeMoveSelector,
    SubChainSwapMoveSelector,
    SwapMoveSelector,
    TailChainSwapMoveSelector,
    UnionMoveSelector,
};
pub use phase::construction::{
    ConstructionInitializer, InitializationSummary, InitializerEventSink, NoopEventSink,
    TracingEventSink,
};
pub use scope::PhaseScope;
pub use termination::{
    AnyTermination, ExternalTermination, StepCountTermination, Termination, TimeTermination,
};
