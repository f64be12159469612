//! Swap move selector.

use std::fmt::Debug;

use planforge_config::SelectionOrder;
use planforge_core::domain::{BasicVariable, PlanningSolution};
use planforge_scoring::ScoreDirector;
use rand::Rng;

use crate::heuristic::r#move::{CompositeMove, GenericMove, SwapMove};

use super::random::SelectorRng;
use super::MoveSelector;

/// Yields swaps between pairs of entities of one entity class.
///
/// With a single variable every move is a [`SwapMove`]. With several
/// variables both entities exchange all of them, as one composite move.
/// In original order pairs `(i, j)` with `i < j` are yielded once each.
pub struct SwapMoveSelector<S, V> {
    variables: Vec<BasicVariable<S, V>>,
    order: SelectionOrder,
    rng: SelectorRng,
}

impl<S, V> Debug for SwapMoveSelector<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapMoveSelector")
            .field("variables", &self.variables)
            .field("order", &self.order)
            .finish()
    }
}

impl<S, V> SwapMoveSelector<S, V> {
    /// Creates an original-order selector swapping all given variables.
    pub fn new(variables: Vec<BasicVariable<S, V>>) -> Self {
        Self {
            variables,
            order: SelectionOrder::Original,
            rng: SelectorRng::default(),
        }
    }

    pub fn with_order(mut self, order: SelectionOrder, rng: SelectorRng) -> Self {
        self.order = order;
        self.rng = rng;
        self
    }

    fn entity_count(&self, solution: &S) -> usize {
        self.variables
            .first()
            .map_or(0, |variable| variable.entity_count(solution))
    }
}

impl<S, V> SwapMoveSelector<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn swap(&self, left: usize, right: usize) -> GenericMove<S, V> {
        match self.variables.as_slice() {
            [variable] => GenericMove::Swap(SwapMove::for_variable(variable, left, right)),
            variables => GenericMove::Composite(CompositeMove::new(
                variables
                    .iter()
                    .map(|variable| {
                        GenericMove::Swap(SwapMove::for_variable(variable, left, right))
                    })
                    .collect(),
            )),
        }
    }
}

impl<S, V> MoveSelector<S, GenericMove<S, V>> for SwapMoveSelector<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn iter_moves<'a, D: ScoreDirector<S> + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = GenericMove<S, V>> + 'a> {
        let count = self.entity_count(score_director.working_solution());
        if count < 2 {
            return Box::new(std::iter::empty());
        }

        match self.order {
            SelectionOrder::Original => Box::new(
                (0..count)
                    .flat_map(move |i| (i + 1..count).map(move |j| (i, j)))
                    .map(move |(i, j)| self.swap(i, j)),
            ),
            SelectionOrder::Random => {
                let mut rng = self.rng.restart();
                Box::new(std::iter::from_fn(move || {
                    let left = rng.random_range(0..count);
                    // Shift past `left` so the pair is always distinct.
                    let mut right = rng.random_range(0..count - 1);
                    if right >= left {
                        right += 1;
                    }
                    Some(self.swap(left, right))
                }))
            }
        }
    }

    fn size<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> usize {
        let count = self.entity_count(score_director.working_solution());
        count * count.saturating_sub(1) / 2
    }

    fn is_never_ending(&self) -> bool {
        self.order == SelectionOrder::Random
    }
}
