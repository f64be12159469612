//! Tests for the selector module.

use super::*;
use crate::heuristic::r#move::{GenericMove, Move};
use planforge_core::score::HardSoftScore;
use planforge_scoring::{ScoreDirector, SimpleScoreDirector};
use planforge_test::routing::{calculate_distance_score, previous_variable, RoutingSolution};
use planforge_test::task::{calculate_task_score, priority_variable, TaskSolution};

mod composite;

type TaskDirector = SimpleScoreDirector<TaskSolution, fn(&TaskSolution) -> HardSoftScore>;
type RoutingDirector = SimpleScoreDirector<RoutingSolution, fn(&RoutingSolution) -> HardSoftScore>;

fn task_director(priorities: &[i32]) -> TaskDirector {
    SimpleScoreDirector::new(
        TaskSolution::from_priorities(priorities),
        calculate_task_score as fn(&TaskSolution) -> HardSoftScore,
    )
}

fn routing_director(chains: &[&[usize]], visit_count: usize) -> RoutingDirector {
    SimpleScoreDirector::new(
        RoutingSolution::from_chains(chains, visit_count),
        calculate_distance_score as fn(&RoutingSolution) -> HardSoftScore,
    )
}

fn debug_all<T: std::fmt::Debug>(items: impl IntoIterator<Item = T>) -> Vec<String> {
    items.into_iter().map(|item| format!("{:?}", item)).collect()
}
