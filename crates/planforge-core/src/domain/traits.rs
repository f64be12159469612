//! Solution and entity identity traits.

use std::hash::Hash;

use crate::score::Score;

/// A problem instance together with its current (possibly partial) answer.
///
/// The solution owns its facts, its planning entities and the last score
/// written by a score director. Solvers clone it to keep a best-so-far copy,
/// so it must be cheap enough to clone and safe to send between threads.
///
/// ```
/// use planforge_core::{PlanningSolution, score::HardSoftScore};
///
/// #[derive(Clone)]
/// struct Timetable {
///     lessons: Vec<Option<usize>>,
///     score: Option<HardSoftScore>,
/// }
///
/// impl PlanningSolution for Timetable {
///     type Score = HardSoftScore;
///
///     fn score(&self) -> Option<HardSoftScore> {
///         self.score
///     }
///
///     fn set_score(&mut self, score: Option<HardSoftScore>) {
///         self.score = score;
///     }
///
///     fn is_initialized(&self) -> bool {
///         self.lessons.iter().all(Option::is_some)
///     }
/// }
/// ```
pub trait PlanningSolution: Clone + Send + Sync + 'static {
    type Score: Score;

    /// `None` until a score director has evaluated the solution.
    fn score(&self) -> Option<Self::Score>;

    fn set_score(&mut self, score: Option<Self::Score>);

    /// Whether every planning variable holds a value.
    fn is_initialized(&self) -> bool {
        true
    }
}

/// Stable identity of an entity or fact.
///
/// Ids break ties deterministically and put entities back into canonical
/// order once a run finishes. An id never changes while solving.
pub trait PlanningId {
    type Id: Ord + Eq + Hash + Clone + Send + Sync + 'static;

    fn planning_id(&self) -> Self::Id;
}
