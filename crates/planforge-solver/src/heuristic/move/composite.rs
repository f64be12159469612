//! CompositeMove - applies several moves as one atomic step.
//!
//! Produced by the cartesian product selector: one component per child
//! selector, applied in order.

use std::fmt::Debug;

use planforge_core::domain::PlanningSolution;
use planforge_core::score::Score;
use planforge_scoring::{ScoreDirector, SimpleScoreDirector};

use super::Move;

/// A move that applies its components in sequence.
///
/// The components are assumed to be independent; nothing checks that they
/// touch disjoint variables.
pub struct CompositeMove<S, M> {
    moves: Vec<M>,
    entities: Vec<usize>,
    _phantom: std::marker::PhantomData<fn() -> S>,
}

impl<S, M: Clone> Clone for CompositeMove<S, M> {
    fn clone(&self) -> Self {
        Self {
            moves: self.moves.clone(),
            entities: self.entities.clone(),
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, M: Debug> Debug for CompositeMove<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMove")
            .field("moves", &self.moves)
            .finish()
    }
}

impl<S: PlanningSolution, M: Move<S>> CompositeMove<S, M> {
    /// Creates a composite move from its components, in application order.
    pub fn new(moves: Vec<M>) -> Self {
        let entities = moves
            .iter()
            .flat_map(|m| m.entity_indices().iter().copied())
            .collect();
        Self {
            moves,
            entities,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the components, in application order.
    pub fn moves(&self) -> &[M] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

// A named fn keeps the scratch director's type independent of `D`, so
// nested composites do not instantiate an endless chain of director types.
fn zero_score<S: PlanningSolution>(_: &S) -> S::Score {
    S::Score::zero()
}

impl<S, M> Move<S> for CompositeMove<S, M>
where
    S: PlanningSolution,
    M: Move<S>,
{
    type Undo = CompositeMove<S, M::Undo>;

    /// Doable when at least one component would change the solution.
    fn is_doable<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> bool {
        self.moves.iter().any(|m| m.is_doable(score_director))
    }

    fn do_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &mut D) {
        for m in &self.moves {
            m.do_move(score_director);
        }
    }

    /// Each component's undo is taken from the state the component itself
    /// sees, so the components are replayed on a scratch copy.
    fn undo_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> Self::Undo {
        let mut scratch = SimpleScoreDirector::new(
            score_director.clone_working_solution(),
            zero_score::<S> as fn(&S) -> S::Score,
        );
        let mut undos = Vec::with_capacity(self.moves.len());
        for m in &self.moves {
            undos.push(m.undo_move(&scratch));
            m.do_move(&mut scratch);
        }
        undos.reverse();
        CompositeMove::new(undos)
    }

    fn descriptor_index(&self) -> usize {
        self.moves.first().map_or(0, |m| m.descriptor_index())
    }

    fn entity_indices(&self) -> &[usize] {
        &self.entities
    }

    fn variable_name(&self) -> &str {
        self.moves.first().map_or("", |m| m.variable_name())
    }
}
