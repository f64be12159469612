//! Entry point that hides the initializer wiring.

use planforge_config::{PhaseConfig, SolverConfig};
use planforge_core::domain::DemandSolution;
use planforge_core::error::Result;
use planforge_scoring::SimpleScoreDirector;
use planforge_solver::{
    AnyTermination, ConstructionInitializer, InitializationSummary, InitializerEventSink,
    TracingEventSink,
};
use tracing::debug;

/// Builds a first complete solution, logging progress through `tracing`.
///
/// Terminations come from the solver-level `termination` and from the
/// first construction heuristic phase of `config`, if any.
///
/// # Errors
///
/// Propagates the initializer's errors.
///
/// # Example
///
/// ```
/// use planforge::initialize_solution;
/// use planforge::SolverConfig;
/// use planforge_test::roster::{calculate_roster_score, NurseRoster, ShiftKind};
///
/// let roster = NurseRoster::builder()
///     .employee("Ann")
///     .shift(1, ShiftKind::Early, 1)
///     .build();
///
/// let (roster, summary) =
///     initialize_solution(roster, calculate_roster_score, &SolverConfig::new()).unwrap();
///
/// assert_eq!(summary.entities_assigned, 1);
/// assert_eq!(roster.assignments[0].employee, Some(0));
/// ```
pub fn initialize_solution<S, C>(
    solution: S,
    score_calculator: C,
    config: &SolverConfig,
) -> Result<(S, InitializationSummary<S::Score>)>
where
    S: DemandSolution,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    initialize_solution_with_sink(solution, score_calculator, config, &mut TracingEventSink)
}

/// Like [`initialize_solution`], reporting to a caller-supplied sink.
pub fn initialize_solution_with_sink<S, C, E>(
    solution: S,
    score_calculator: C,
    config: &SolverConfig,
    sink: &mut E,
) -> Result<(S, InitializationSummary<S::Score>)>
where
    S: DemandSolution,
    C: Fn(&S) -> S::Score + Send + Sync,
    E: InitializerEventSink<S> + ?Sized,
{
    let mut director = SimpleScoreDirector::new(solution, score_calculator);
    let summary = initializer_for(config).initialize(&mut director, sink)?;
    Ok((director.take_solution(), summary))
}

fn initializer_for(config: &SolverConfig) -> ConstructionInitializer {
    let mut initializer = ConstructionInitializer::new();
    if let Some(termination) = &config.termination {
        initializer = initializer.with_termination(AnyTermination::from_config(termination));
    }
    let phase_termination = config.phases.iter().find_map(|phase| match phase {
        PhaseConfig::ConstructionHeuristic(construction) => construction.termination.as_ref(),
        PhaseConfig::LocalSearch(_) => None,
    });
    if let Some(termination) = phase_termination {
        initializer = initializer.with_termination(AnyTermination::from_config(termination));
    }
    debug!(
        event = "initializer_configured",
        solver_termination = config.termination.is_some(),
        phase_termination = phase_termination.is_some(),
    );
    initializer
}
