//! Change move selector.

use std::fmt::Debug;

use planforge_config::SelectionOrder;
use planforge_core::domain::{BasicVariable, PlanningSolution};
use planforge_scoring::ScoreDirector;
use rand::Rng;

use crate::heuristic::r#move::ChangeMove;

use super::random::SelectorRng;
use super::MoveSelector;

/// Yields a [`ChangeMove`] for every entity and every value of a variable.
///
/// In original order moves come entity by entity, values in value-range
/// order. No-op moves are yielded (and rejected by `is_doable`) unless
/// [`skip_noops`](ChangeMoveSelector::skip_noops) is set.
pub struct ChangeMoveSelector<S, V> {
    variable: BasicVariable<S, V>,
    order: SelectionOrder,
    rng: SelectorRng,
    skip_noops: bool,
}

impl<S, V> Debug for ChangeMoveSelector<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeMoveSelector")
            .field("variable", &self.variable)
            .field("order", &self.order)
            .field("skip_noops", &self.skip_noops)
            .finish()
    }
}

impl<S, V> ChangeMoveSelector<S, V> {
    /// Creates an original-order selector.
    pub fn new(variable: BasicVariable<S, V>) -> Self {
        Self {
            variable,
            order: SelectionOrder::Original,
            rng: SelectorRng::default(),
            skip_noops: false,
        }
    }

    pub fn with_order(mut self, order: SelectionOrder, rng: SelectorRng) -> Self {
        self.order = order;
        self.rng = rng;
        self
    }

    /// Filters out moves that would assign an entity its current value.
    pub fn skip_noops(mut self) -> Self {
        self.skip_noops = true;
        self
    }

    pub fn variable(&self) -> &BasicVariable<S, V> {
        &self.variable
    }
}

impl<S, V> MoveSelector<S, ChangeMove<S, V>> for ChangeMoveSelector<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn iter_moves<'a, D: ScoreDirector<S> + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = ChangeMove<S, V>> + 'a> {
        let solution = score_director.working_solution();
        let variable = self.variable;
        let entity_count = variable.entity_count(solution);
        let values = variable.values(solution);
        let value_count = values.len();
        if entity_count == 0 || value_count == 0 {
            return Box::new(std::iter::empty());
        }
        // With a single value every random draw could be a no-op.
        if self.skip_noops
            && value_count == 1
            && (0..entity_count).all(|e| variable.get(solution, e).as_ref() == Some(&values[0]))
        {
            return Box::new(std::iter::empty());
        }

        let moves: Box<dyn Iterator<Item = (usize, V)> + 'a> = match self.order {
            SelectionOrder::Original => Box::new(
                (0..entity_count * value_count)
                    .map(move |k| (k / value_count, values[k % value_count].clone())),
            ),
            SelectionOrder::Random => {
                let mut rng = self.rng.restart();
                Box::new(std::iter::from_fn(move || {
                    let entity = rng.random_range(0..entity_count);
                    let value = values[rng.random_range(0..value_count)].clone();
                    Some((entity, value))
                }))
            }
        };

        let skip_noops = self.skip_noops;
        Box::new(
            moves
                .filter(move |(entity, value)| {
                    !skip_noops || variable.get(solution, *entity).as_ref() != Some(value)
                })
                .map(move |(entity, value)| {
                    ChangeMove::for_variable(&variable, entity, Some(value))
                }),
        )
    }

    fn size<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> usize {
        let solution = score_director.working_solution();
        self.variable.entity_count(solution) * self.variable.values(solution).len()
    }

    fn is_never_ending(&self) -> bool {
        self.order == SelectionOrder::Random
    }
}
