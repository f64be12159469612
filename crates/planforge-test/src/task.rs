//! A list of tasks, each needing a priority from `1..=3`.
//!
//! The smallest solution with a basic variable: good for exercising moves
//! and selectors without any demand bookkeeping.
//!
//! ```
//! use planforge_test::task::{calculate_task_score, TaskSolution};
//!
//! let tasks = TaskSolution::from_priorities(&[1, 3]);
//! assert_eq!(calculate_task_score(&tasks).soft(), -4);
//! ```

use planforge_core::domain::{BasicVariable, PlanningSolution};
use planforge_core::score::HardSoftScore;

#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub priority: Option<i32>,
}

impl Task {
    pub fn with_priority(priority: i32) -> Self {
        Self {
            priority: Some(priority),
        }
    }

    pub fn unassigned() -> Self {
        Self { priority: None }
    }
}

#[derive(Clone, Debug)]
pub struct TaskSolution {
    pub tasks: Vec<Task>,
    pub score: Option<HardSoftScore>,
}

impl TaskSolution {
    /// `n` tasks without a priority.
    pub fn unassigned(n: usize) -> Self {
        Self {
            tasks: vec![Task::unassigned(); n],
            score: None,
        }
    }

    pub fn from_priorities(priorities: &[i32]) -> Self {
        Self {
            tasks: priorities.iter().map(|&p| Task::with_priority(p)).collect(),
            score: None,
        }
    }

    /// Priorities in task order.
    pub fn assigned(&self) -> Vec<Option<i32>> {
        self.tasks.iter().map(|t| t.priority).collect()
    }
}

impl PlanningSolution for TaskSolution {
    type Score = HardSoftScore;

    fn score(&self) -> Option<HardSoftScore> {
        self.score
    }

    fn set_score(&mut self, score: Option<HardSoftScore>) {
        self.score = score;
    }

    fn is_initialized(&self) -> bool {
        self.tasks.iter().all(|t| t.priority.is_some())
    }
}

pub fn set_priority(s: &mut TaskSolution, idx: usize, priority: Option<i32>) {
    if let Some(task) = s.tasks.get_mut(idx) {
        task.priority = priority;
    }
}

/// The `priority` variable over `1..=3`.
pub fn priority_variable() -> BasicVariable<TaskSolution, i32> {
    BasicVariable::new(
        "priority",
        0,
        |s: &TaskSolution| s.tasks.len(),
        |s: &TaskSolution, idx| s.tasks.get(idx).and_then(|t| t.priority),
        set_priority,
        |_: &TaskSolution| vec![1, 2, 3],
    )
}

/// Hard: one per task without a priority. Soft: minus the priority sum.
pub fn calculate_task_score(s: &TaskSolution) -> HardSoftScore {
    s.tasks.iter().fold(HardSoftScore::ZERO, |score, task| {
        score
            + match task.priority {
                Some(p) => HardSoftScore::of_soft(-i64::from(p)),
                None => HardSoftScore::of_hard(-1),
            }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_priority_ignores_missing_task() {
        let mut solution = TaskSolution::unassigned(2);

        set_priority(&mut solution, 0, Some(5));
        set_priority(&mut solution, 9, Some(1));

        assert_eq!(solution.assigned(), vec![Some(5), None]);
        assert!(!solution.is_initialized());
    }

    #[test]
    fn test_task_score() {
        let mut solution = TaskSolution::from_priorities(&[2]);
        solution.tasks.push(Task::unassigned());

        assert_eq!(calculate_task_score(&solution), HardSoftScore::of(-1, -2));
    }

    #[test]
    fn test_priority_variable_reads_and_ranges() {
        let solution = TaskSolution::from_priorities(&[3, 1]);
        let variable = priority_variable();

        assert_eq!(variable.entity_count(&solution), 2);
        assert_eq!(variable.get(&solution, 0), Some(3));
        assert_eq!(variable.values(&solution), vec![1, 2, 3]);
    }
}
