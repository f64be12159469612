//! `selected_count_limit`: stop a selector after a fixed number of moves.

use std::fmt::Debug;
use std::marker::PhantomData;

use planforge_core::domain::PlanningSolution;
use planforge_scoring::ScoreDirector;

use crate::heuristic::r#move::Move;
use crate::heuristic::selector::MoveSelector;

/// Yields at most `limit` moves of `child` per pass.
///
/// The cap also bounds random children, so the result is always finite.
pub struct SelectedCountLimitMoveSelector<S, M, Child> {
    child: Child,
    limit: usize,
    _types: PhantomData<(fn() -> S, fn() -> M)>,
}

impl<S, M, Child: Debug> Debug for SelectedCountLimitMoveSelector<S, M, Child> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CountLimit({}, {:?})", self.limit, self.child)
    }
}

impl<S, M, Child> SelectedCountLimitMoveSelector<S, M, Child> {
    pub fn new(child: Child, limit: usize) -> Self {
        Self {
            child,
            limit,
            _types: PhantomData,
        }
    }

    pub fn inner(&self) -> &Child {
        &self.child
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl<S, M, Child> MoveSelector<S, M> for SelectedCountLimitMoveSelector<S, M, Child>
where
    S: PlanningSolution,
    M: Move<S> + 'static,
    Child: MoveSelector<S, M>,
{
    fn iter_moves<'a, D: ScoreDirector<S> + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = M> + 'a> {
        let moves = self.child.iter_moves(score_director);
        Box::new(moves.take(self.limit))
    }

    fn size<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> usize {
        let size = self.child.size(score_director);
        size.min(self.limit)
    }

    fn is_never_ending(&self) -> bool {
        false
    }
}
