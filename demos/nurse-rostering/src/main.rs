//! Nurse Rostering Example
//!
//! Staffs a week of Early, Late and Night shifts. The construction
//! heuristic builds one assignment per required slot, hardest days first;
//! a hill climber then improves the roster with the move selector tree
//! described in `solver.toml`.
//!
//! Run with `RUST_LOG=debug` to see every committed assignment.

mod domain;

use planforge::prelude::*;
use planforge::{build_phase_selectors, GenericMove, MoveSelectorNode, RecordingScoreDirector};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use domain::{calculate_score, nurse_variable, Roster};

const NURSE_COUNT: usize = 6;
const DAYS: u32 = 7;
const MAX_STEPS: u64 = 200;
const MOVES_PER_STEP: usize = 100;
const DEFAULT_CONFIG: &str = include_str!("../solver.toml");

type RosterDirector = SimpleScoreDirector<Roster, fn(&Roster) -> HardSoftScore>;

fn main() -> planforge::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match SolverConfig::load("solver.toml") {
        Ok(config) => config,
        Err(_) => SolverConfig::from_toml_str(DEFAULT_CONFIG)?,
    };

    let roster = Roster::generate(NURSE_COUNT, DAYS);
    let (roster, summary) = initialize_solution(roster, calculate_score, &config)?;
    info!(
        event = "initialized",
        entities = summary.entities_assigned,
        score = %summary.score,
        feasible = summary.score.is_feasible(),
    );

    let registry = FactoryRegistry::new().with_weight_factory(
        "favour_swaps",
        |_: &Roster, child: usize| match child {
            0 => 1.0,
            1 => 2.0,
            _ => 0.5,
        },
    );
    let context = SelectorContext::new()
        .with_basic_variable("Assignment", nurse_variable())
        .with_registry(registry);
    let selectors = build_phase_selectors(&config, context)?;

    let mut director: RosterDirector =
        SimpleScoreDirector::new(roster, calculate_score as fn(&Roster) -> HardSoftScore);
    for (phase_index, selector) in selectors.iter().enumerate() {
        let score = hill_climb(&mut director, selector, phase_index);
        info!(event = "local_search_end", phase_index, score = %score);
    }

    let score = director.calculate_score();
    let mut roster = director.take_solution();
    roster.set_score(Some(score));
    roster.print();
    Ok(())
}

/// Takes the best improving move of each sampled batch until none improves.
fn hill_climb(
    director: &mut RosterDirector,
    selector: &MoveSelectorNode<Roster, usize>,
    phase_index: usize,
) -> HardSoftScore {
    let mut current = director.calculate_score();

    for step in 0..MAX_STEPS {
        let moves: Vec<GenericMove<Roster, usize>> = selector
            .iter_moves(&*director)
            .take(MOVES_PER_STEP)
            .collect();

        let mut best: Option<(usize, HardSoftScore)> = None;
        for (index, candidate) in moves.iter().enumerate() {
            if !candidate.is_doable(&*director) {
                continue;
            }
            let mut recording = RecordingScoreDirector::new(&mut *director);
            candidate.do_move(&mut recording);
            let score = recording.calculate_score();
            recording.undo_changes();

            if score > best.map_or(current, |(_, s)| s) {
                best = Some((index, score));
            }
        }

        let Some((index, score)) = best else {
            debug!(event = "local_optimum", phase_index, step);
            break;
        };
        moves[index].do_move(director);
        current = score;
        debug!(event = "step", phase_index, step, score = %score);
    }

    current
}
