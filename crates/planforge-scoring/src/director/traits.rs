//! The `ScoreDirector` trait.

use planforge_core::domain::PlanningSolution;
use planforge_core::error::Result;

/// Owns the working solution and answers "what is its score right now".
///
/// Moves and the initializer mutate the solution only between a
/// `before_variable_changed` / `after_variable_changed` pair, which lets
/// incremental implementations retract and re-insert the touched entity.
/// Anything else that edits the solution behind the director's back must be
/// followed by [`reset`](ScoreDirector::reset).
pub trait ScoreDirector<S: PlanningSolution>: Send {
    fn working_solution(&self) -> &S;

    /// Mutable access. Implementations treat this as invalidating any cache.
    fn working_solution_mut(&mut self) -> &mut S;

    fn calculate_score(&mut self) -> S::Score;

    /// Fallible scoring.
    ///
    /// An `Err` rejects the current candidate only; see
    /// [`PlanForgeError::is_transient`](planforge_core::PlanForgeError::is_transient).
    fn try_calculate_score(&mut self) -> Result<S::Score> {
        Ok(self.calculate_score())
    }

    fn clone_working_solution(&self) -> S;

    fn before_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    );

    fn after_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    );

    /// An entity was pushed onto the solution; there is no matching
    /// `before_*` call.
    fn after_entity_added(&mut self, descriptor_index: usize, entity_index: usize) {
        self.after_variable_changed(descriptor_index, entity_index, "");
    }

    fn is_incremental(&self) -> bool {
        false
    }

    /// Drops cached state after an unnotified change.
    fn reset(&mut self) {}

    /// Hands the director a closure that reverts the change just made.
    ///
    /// Only [`RecordingScoreDirector`](super::RecordingScoreDirector) keeps
    /// them; every other director drops the closure.
    fn register_undo(&mut self, _undo: Box<dyn FnOnce(&mut S) + Send>) {}
}
