//! Tests for the score director implementations.

use planforge_core::domain::PlanningSolution;
use planforge_core::error::PlanForgeError;
use planforge_core::score::HardSoftScore;
use planforge_test::task::{calculate_task_score, set_priority, TaskSolution};

use super::*;

// ============================================================================
// Fixtures
// ============================================================================

/// Incremental mirror of `calculate_task_score`.
#[derive(Default)]
struct TaskCalculator {
    unassigned: i64,
    total: i64,
    resets: usize,
}

impl TaskCalculator {
    fn retract(&mut self, solution: &TaskSolution, entity_index: usize) {
        match solution.tasks[entity_index].priority {
            Some(p) => self.total -= i64::from(p),
            None => self.unassigned -= 1,
        }
    }

    fn insert(&mut self, solution: &TaskSolution, entity_index: usize) {
        match solution.tasks[entity_index].priority {
            Some(p) => self.total += i64::from(p),
            None => self.unassigned += 1,
        }
    }
}

impl IncrementalScoreCalculator<TaskSolution> for TaskCalculator {
    fn reset_working_solution(&mut self, solution: &TaskSolution) {
        self.unassigned = 0;
        self.total = 0;
        self.resets += 1;
        for idx in 0..solution.tasks.len() {
            self.insert(solution, idx);
        }
    }

    fn before_entity_changed(&mut self, solution: &TaskSolution, _: usize, entity_index: usize) {
        self.retract(solution, entity_index);
    }

    fn after_entity_changed(&mut self, solution: &TaskSolution, _: usize, entity_index: usize) {
        self.insert(solution, entity_index);
    }

    fn calculate_score(&self) -> HardSoftScore {
        HardSoftScore::of(-self.unassigned, -self.total)
    }

    fn try_calculate_score(&self) -> planforge_core::Result<HardSoftScore> {
        if self.total > 100 {
            return Err(PlanForgeError::ScoreCalculation("overflow".to_string()));
        }
        Ok(self.calculate_score())
    }
}

fn change_priority<D: ScoreDirector<TaskSolution>>(director: &mut D, idx: usize, v: Option<i32>) {
    director.before_variable_changed(0, idx, "priority");
    set_priority(director.working_solution_mut(), idx, v);
    director.after_variable_changed(0, idx, "priority");
}

// ============================================================================
// SimpleScoreDirector tests
// ============================================================================

#[test]
fn test_simple_director_calculates_score() {
    let solution = TaskSolution::from_priorities(&[1, 2]);
    let mut director = SimpleScoreDirector::new(solution, calculate_task_score);

    assert_eq!(director.calculate_score(), HardSoftScore::of(0, -3));
    assert_eq!(
        director.working_solution().score(),
        Some(HardSoftScore::of(0, -3))
    );
    assert!(!director.is_incremental());
}

#[test]
fn test_simple_director_sees_notified_changes() {
    let solution = TaskSolution::from_priorities(&[1, 2]);
    let mut director = SimpleScoreDirector::new(solution, calculate_task_score);
    director.calculate_score();

    change_priority(&mut director, 0, Some(3));
    assert_eq!(director.calculate_score(), HardSoftScore::of(0, -5));

    change_priority(&mut director, 1, None);
    assert_eq!(director.try_calculate_score().unwrap(), HardSoftScore::of(-1, -3));
}

#[test]
fn test_simple_director_entity_added() {
    let mut director = SimpleScoreDirector::new(TaskSolution::unassigned(0), calculate_task_score);
    assert_eq!(director.calculate_score(), HardSoftScore::ZERO);

    director
        .working_solution_mut()
        .tasks
        .push(planforge_test::Task::with_priority(2));
    director.after_entity_added(0, 0);
    assert_eq!(director.calculate_score(), HardSoftScore::of(0, -2));
}

// ============================================================================
// IncrementalScoreDirector tests
// ============================================================================

#[test]
fn test_incremental_matches_full_recalculation() {
    let solution = TaskSolution::from_priorities(&[1, 2, 3]);
    let mut director = IncrementalScoreDirector::new(solution, TaskCalculator::default());

    assert_eq!(director.calculate_score(), HardSoftScore::of(0, -6));

    change_priority(&mut director, 0, None);
    change_priority(&mut director, 2, Some(1));

    let expected = calculate_task_score(director.working_solution());
    assert_eq!(director.calculate_score(), expected);
    assert_eq!(director.calculator().resets, 1);
}

#[test]
fn test_incremental_ignores_notifications_before_first_score() {
    let solution = TaskSolution::from_priorities(&[1]);
    let mut director = IncrementalScoreDirector::new(solution, TaskCalculator::default());

    change_priority(&mut director, 0, Some(3));
    assert!(!director.is_initialized());
    assert_eq!(director.calculate_score(), HardSoftScore::of(0, -3));
}

#[test]
fn test_incremental_reset_rescans() {
    let solution = TaskSolution::from_priorities(&[1]);
    let mut director = IncrementalScoreDirector::new(solution, TaskCalculator::default());
    director.calculate_score();

    director.working_solution_mut().tasks[0].priority = Some(2);
    director.reset();

    assert_eq!(director.calculate_score(), HardSoftScore::of(0, -2));
    assert_eq!(director.calculator().resets, 2);
}

#[test]
fn test_incremental_entity_added() {
    let mut director =
        IncrementalScoreDirector::new(TaskSolution::unassigned(0), TaskCalculator::default());
    director.calculate_score();

    director
        .working_solution_mut()
        .tasks
        .push(planforge_test::Task::unassigned());
    director.after_entity_added(0, 0);

    assert_eq!(director.calculate_score(), HardSoftScore::of(-1, 0));
}

#[test]
fn test_incremental_try_calculate_reports_failure() {
    let solution = TaskSolution::from_priorities(&[1]);
    let mut director = IncrementalScoreDirector::new(solution, TaskCalculator::default());
    director.calculate_score();

    change_priority(&mut director, 0, Some(500));
    let err = director.try_calculate_score().unwrap_err();
    assert!(err.is_transient());
}

// ============================================================================
// RecordingScoreDirector tests
// ============================================================================

#[test]
fn test_recording_undo_restores_state() {
    let solution = TaskSolution::from_priorities(&[1, 2]);
    let mut inner = SimpleScoreDirector::new(solution, calculate_task_score);
    let before = inner.calculate_score();

    let mut recording = RecordingScoreDirector::new(&mut inner);
    change_priority(&mut recording, 0, Some(3));
    recording.register_undo(Box::new(|s: &mut TaskSolution| set_priority(s, 0, Some(1))));
    assert_eq!(recording.calculate_score(), HardSoftScore::of(0, -5));
    assert_eq!(recording.change_count(), 1);

    recording.undo_changes();
    assert!(recording.is_empty());
    assert_eq!(recording.calculate_score(), before);
}

#[test]
fn test_recording_undo_keeps_incremental_director_consistent() {
    let solution = TaskSolution::from_priorities(&[1, 2]);
    let mut inner = IncrementalScoreDirector::new(solution, TaskCalculator::default());
    let before = inner.calculate_score();

    {
        let mut recording = RecordingScoreDirector::new(&mut inner);
        change_priority(&mut recording, 1, None);
        recording.register_undo(Box::new(|s: &mut TaskSolution| set_priority(s, 1, Some(2))));
        assert_eq!(recording.calculate_score(), HardSoftScore::of(-1, -1));
        recording.undo_changes();
    }

    assert_eq!(inner.calculate_score(), before);
    assert_eq!(inner.calculator().resets, 1);
}

#[test]
fn test_recording_undo_runs_in_reverse_order() {
    let solution = TaskSolution::from_priorities(&[1]);
    let mut inner = SimpleScoreDirector::new(solution, calculate_task_score);

    let mut recording = RecordingScoreDirector::new(&mut inner);
    recording.register_undo(Box::new(|s: &mut TaskSolution| set_priority(s, 0, Some(7))));
    recording.register_undo(Box::new(|s: &mut TaskSolution| set_priority(s, 0, Some(9))));
    recording.undo_changes();

    assert_eq!(recording.working_solution().tasks[0].priority, Some(7));
}
