//! Tests for the move module.

use super::*;
use planforge_core::domain::{ChainLink, SubChain};
use planforge_core::score::HardSoftScore;
use planforge_scoring::{RecordingScoreDirector, ScoreDirector, SimpleScoreDirector};
use planforge_test::routing::{self, calculate_distance_score, previous_variable, RoutingSolution};
use planforge_test::task::{calculate_task_score, priority_variable, TaskSolution};

mod chain;
mod composite;
mod pillar;

fn task_director(
    priorities: &[i32],
) -> SimpleScoreDirector<TaskSolution, fn(&TaskSolution) -> HardSoftScore> {
    SimpleScoreDirector::new(
        TaskSolution::from_priorities(priorities),
        calculate_task_score as fn(&TaskSolution) -> HardSoftScore,
    )
}

fn routing_director(
    chains: &[&[usize]],
    visit_count: usize,
) -> SimpleScoreDirector<RoutingSolution, fn(&RoutingSolution) -> HardSoftScore> {
    SimpleScoreDirector::new(
        RoutingSolution::from_chains(chains, visit_count),
        calculate_distance_score as fn(&RoutingSolution) -> HardSoftScore,
    )
}

/// Applies the move, then its inverse, and checks the solution round-trips.
fn assert_undo_restores_tasks<M: Move<TaskSolution>>(
    director: &mut SimpleScoreDirector<TaskSolution, fn(&TaskSolution) -> HardSoftScore>,
    m: &M,
) {
    let before = director.working_solution().assigned();
    let undo = m.undo_move(&*director);
    m.do_move(director);
    undo.do_move(director);
    assert_eq!(director.working_solution().assigned(), before);
}

fn assert_undo_restores_links<M: Move<RoutingSolution>>(
    director: &mut SimpleScoreDirector<RoutingSolution, fn(&RoutingSolution) -> HardSoftScore>,
    m: &M,
) {
    let before = director.working_solution().links();
    let undo = m.undo_move(&*director);
    m.do_move(director);
    undo.do_move(director);
    assert_eq!(director.working_solution().links(), before);
}
