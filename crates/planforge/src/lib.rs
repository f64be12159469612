//! PlanForge - construction heuristics and configurable move selectors
//!
//! Build a first solution from demand units, then explore it with move
//! selector trees described in TOML or YAML.
//!
//! # Example
//!
//! ```rust
//! use planforge::prelude::*;
//!
//! // Score types are re-exported
//! let score = HardSoftScore::of(0, -100);
//! assert_eq!(score.hard(), 0);
//! assert_eq!(score.soft(), -100);
//! ```

// Score types
pub use planforge_core::score::{BendableScore, HardMediumSoftScore, HardSoftScore, Score};

// Domain model
pub use planforge_core::domain::{
    initialization_order, BasicVariable, ChainIndex, ChainLink, ChainedVariable, DemandSolution,
    InitializationWeight, PlanningId, PlanningSolution, SubChain,
};
pub use planforge_core::error::{PlanForgeError, Result};

// Score directors
pub use planforge_scoring::{RecordingScoreDirector, ScoreDirector, SimpleScoreDirector};

// Configuration
pub use planforge_config::{ConfigError, MoveSelectorConfig, SelectionOrder, SolverConfig};

// Solver components
pub use planforge_solver::{
    build_move_selector, build_phase_selectors, AnyTermination, ConstructionInitializer,
    ExternalTermination, FactoryRegistry, GenericMove, InitializationSummary,
    InitializerEventSink, Move, MoveSelector, MoveSelectorNode, NoopEventSink, SelectorContext,
    StepCountTermination, Termination, TimeTermination, TracingEventSink,
};

#[cfg(feature = "console")]
pub mod console;

mod solver;
pub use solver::{initialize_solution, initialize_solution_with_sink};

pub mod prelude {
    pub use super::{BendableScore, HardMediumSoftScore, HardSoftScore, Score};
    pub use super::{
        BasicVariable, ChainLink, ChainedVariable, DemandSolution, InitializationWeight,
        PlanningId, PlanningSolution,
    };
    pub use super::{
        build_move_selector, initialize_solution, ConstructionInitializer, FactoryRegistry, Move,
        MoveSelector, MoveSelectorConfig, ScoreDirector, SelectorContext, SimpleScoreDirector,
        SolverConfig,
    };
}
