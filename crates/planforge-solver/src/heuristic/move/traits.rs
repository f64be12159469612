//! Move trait definition.

use std::fmt::Debug;

use planforge_core::domain::PlanningSolution;
use planforge_scoring::ScoreDirector;

/// A move that modifies one or more planning variables.
///
/// Moves are fully typed: getters and setters are function pointers over the
/// solution, so no boxing or downcasting happens on the hot path.
///
/// # Type Parameters
/// * `S` - The planning solution type
///
/// # Implementation Notes
/// - Moves should be lightweight and are transient
/// - `do_move` notifies the director around every variable change and
///   registers an undo closure, so `RecordingScoreDirector` can roll back
/// - `undo_move` builds the inverse move from the state *before* `do_move`
/// - Methods are generic over D to allow use with both concrete directors,
///   `dyn ScoreDirector` and `RecordingScoreDirector`
pub trait Move<S: PlanningSolution>: Send + Sync + Debug {
    /// The inverse move type returned by [`undo_move`](Move::undo_move).
    type Undo: Move<S>;

    /// Returns true if this move can be executed in the current state.
    ///
    /// A move is not doable if:
    /// - It would not change anything (same value, swap with itself)
    /// - Its structure no longer matches the solution (stale pillar or chain)
    fn is_doable<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> bool;

    /// Executes this move, modifying the working solution.
    fn do_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &mut D);

    /// Creates the move that restores the current state once this move is done.
    ///
    /// Must be called before [`do_move`](Move::do_move).
    fn undo_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> Self::Undo;

    /// Returns the descriptor index of the entity type this move affects.
    fn descriptor_index(&self) -> usize;

    /// Returns the entity indices involved in this move.
    fn entity_indices(&self) -> &[usize];

    /// Returns the variable name this move affects.
    fn variable_name(&self) -> &str;
}
