//! Move selector trait.

use std::fmt::Debug;

use planforge_core::domain::PlanningSolution;
use planforge_scoring::ScoreDirector;

use crate::heuristic::r#move::Move;

/// A move selector that yields moves of type `M`.
///
/// Selectors are pure sequence producers: every call to
/// [`iter_moves`](MoveSelector::iter_moves) starts a fresh pass over the
/// current working solution. In original order the pass is finite; in
/// random order it is unbounded and each call reseeds from the selector's
/// generator, so a restarted pass is reproducible.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `M` - The move type
pub trait MoveSelector<S: PlanningSolution, M: Move<S>>: Send + Debug {
    /// Returns an iterator over moves for the current working solution.
    fn iter_moves<'a, D: ScoreDirector<S> + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = M> + 'a>;

    /// Returns the number of distinct moves in one original-order pass.
    fn size<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> usize;

    /// Returns true if this selector may return the same move multiple times.
    fn is_never_ending(&self) -> bool {
        false
    }
}
