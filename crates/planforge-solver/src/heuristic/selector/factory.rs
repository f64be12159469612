//! User-supplied move factories.
//!
//! Factories are registered by name in a
//! [`FactoryRegistry`](crate::builder::FactoryRegistry) and referenced from
//! `move_list_factory` and `move_iterator_factory` selector configs.

use std::fmt::Debug;
use std::sync::Arc;

use planforge_config::SelectionOrder;
use planforge_core::domain::PlanningSolution;
use planforge_scoring::ScoreDirector;
use rand::rngs::StdRng;
use rand::Rng;

use crate::heuristic::r#move::Move;

use super::random::SelectorRng;
use super::MoveSelector;

/// Produces the complete list of moves for a solution.
///
/// Closures `Fn(&S) -> Vec<M>` implement this trait.
pub trait MoveListFactory<S, M>: Send + Sync {
    fn create_moves(&self, solution: &S) -> Vec<M>;
}

impl<S, M, F> MoveListFactory<S, M> for F
where
    F: Fn(&S) -> Vec<M> + Send + Sync,
{
    fn create_moves(&self, solution: &S) -> Vec<M> {
        self(solution)
    }
}

/// Produces moves lazily, for problems where listing every move is too costly.
pub trait MoveIteratorFactory<S, M>: Send + Sync {
    /// Returns the number of moves in one original-order pass.
    fn size(&self, solution: &S) -> usize;

    /// Returns a finite pass over the moves.
    fn original_moves<'a>(&'a self, solution: &'a S) -> Box<dyn Iterator<Item = M> + 'a>;

    /// Returns an unbounded sequence of moves drawn with `rng`.
    fn random_moves<'a>(&'a self, solution: &'a S, rng: StdRng)
        -> Box<dyn Iterator<Item = M> + 'a>;
}

/// Selector over the moves of a [`MoveListFactory`].
///
/// In random order moves are drawn from the list with replacement.
pub struct MoveListFactorySelector<S, M> {
    factory: Arc<dyn MoveListFactory<S, M>>,
    order: SelectionOrder,
    rng: SelectorRng,
}

impl<S, M> Debug for MoveListFactorySelector<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveListFactorySelector")
            .field("order", &self.order)
            .finish()
    }
}

impl<S, M> MoveListFactorySelector<S, M> {
    pub fn new(factory: Arc<dyn MoveListFactory<S, M>>) -> Self {
        Self {
            factory,
            order: SelectionOrder::Original,
            rng: SelectorRng::default(),
        }
    }

    pub fn with_order(mut self, order: SelectionOrder, rng: SelectorRng) -> Self {
        self.order = order;
        self.rng = rng;
        self
    }
}

impl<S, M> MoveSelector<S, M> for MoveListFactorySelector<S, M>
where
    S: PlanningSolution,
    M: Move<S> + Clone + 'static,
{
    fn iter_moves<'a, D: ScoreDirector<S> + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = M> + 'a> {
        let moves = self.factory.create_moves(score_director.working_solution());
        match self.order {
            SelectionOrder::Original => Box::new(moves.into_iter()),
            SelectionOrder::Random if moves.is_empty() => Box::new(std::iter::empty()),
            SelectionOrder::Random => {
                let mut rng = self.rng.restart();
                Box::new(std::iter::from_fn(move || {
                    Some(moves[rng.random_range(0..moves.len())].clone())
                }))
            }
        }
    }

    fn size<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> usize {
        self.factory
            .create_moves(score_director.working_solution())
            .len()
    }

    fn is_never_ending(&self) -> bool {
        self.order == SelectionOrder::Random
    }
}

/// Selector over the moves of a [`MoveIteratorFactory`].
pub struct MoveIteratorFactorySelector<S, M> {
    factory: Arc<dyn MoveIteratorFactory<S, M>>,
    order: SelectionOrder,
    rng: SelectorRng,
}

impl<S, M> Debug for MoveIteratorFactorySelector<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveIteratorFactorySelector")
            .field("order", &self.order)
            .finish()
    }
}

impl<S, M> MoveIteratorFactorySelector<S, M> {
    pub fn new(factory: Arc<dyn MoveIteratorFactory<S, M>>) -> Self {
        Self {
            factory,
            order: SelectionOrder::Original,
            rng: SelectorRng::default(),
        }
    }

    pub fn with_order(mut self, order: SelectionOrder, rng: SelectorRng) -> Self {
        self.order = order;
        self.rng = rng;
        self
    }
}

impl<S, M> MoveSelector<S, M> for MoveIteratorFactorySelector<S, M>
where
    S: PlanningSolution,
    M: Move<S> + 'static,
{
    fn iter_moves<'a, D: ScoreDirector<S> + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = M> + 'a> {
        let solution = score_director.working_solution();
        match self.order {
            SelectionOrder::Original => self.factory.original_moves(solution),
            SelectionOrder::Random => self.factory.random_moves(solution, self.rng.restart()),
        }
    }

    fn size<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> usize {
        self.factory.size(score_director.working_solution())
    }

    fn is_never_ending(&self) -> bool {
        self.order == SelectionOrder::Random
    }
}
