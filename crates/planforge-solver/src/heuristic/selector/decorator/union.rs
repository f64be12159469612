//! Union move selector.
//!
//! In original order the union yields the moves of its children one child
//! after another. In random order every move comes from a child sampled by
//! weight; exhausted children drop out of the draw.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;

use planforge_config::SelectionOrder;
use planforge_core::domain::PlanningSolution;
use planforge_scoring::ScoreDirector;
use rand::Rng;

use crate::heuristic::r#move::Move;
use crate::heuristic::selector::random::SelectorRng;
use crate::heuristic::selector::MoveSelector;

/// Weighs the children of a union for random sampling.
///
/// Closures `Fn(&S, usize) -> f64` implement this trait. Children with a
/// non-positive or non-finite weight are never sampled.
pub trait SelectionProbabilityWeightFactory<S>: Send + Sync {
    fn weight(&self, solution: &S, child_index: usize) -> f64;
}

impl<S, F> SelectionProbabilityWeightFactory<S> for F
where
    F: Fn(&S, usize) -> f64 + Send + Sync,
{
    fn weight(&self, solution: &S, child_index: usize) -> f64 {
        self(solution, child_index)
    }
}

/// Combines the moves of several child selectors.
///
/// # Example
///
/// ```
/// use planforge_solver::heuristic::r#move::ChangeMove;
/// use planforge_solver::heuristic::selector::{ChangeMoveSelector, MoveSelector, UnionMoveSelector};
/// use planforge_scoring::SimpleScoreDirector;
/// use planforge_test::task::{calculate_task_score, priority_variable, TaskSolution};
///
/// let director = SimpleScoreDirector::new(TaskSolution::from_priorities(&[1, 2]), calculate_task_score);
/// let variable = priority_variable();
/// let union: UnionMoveSelector<TaskSolution, ChangeMove<TaskSolution, i32>, _> = UnionMoveSelector::new(vec![
///     ChangeMoveSelector::new(variable),
///     ChangeMoveSelector::new(variable),
/// ]);
///
/// // Two children, each with 2 entities x 3 values.
/// assert_eq!(union.size(&director), 12);
/// assert_eq!(union.iter_moves(&director).count(), 12);
/// ```
pub struct UnionMoveSelector<S, M, C> {
    children: Vec<C>,
    fixed_weights: Vec<f64>,
    weight_factory: Option<Arc<dyn SelectionProbabilityWeightFactory<S>>>,
    order: SelectionOrder,
    rng: SelectorRng,
    _phantom: PhantomData<fn() -> M>,
}

impl<S, M, C: Debug> Debug for UnionMoveSelector<S, M, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionMoveSelector")
            .field("children", &self.children)
            .field("fixed_weights", &self.fixed_weights)
            .field("weight_factory", &self.weight_factory.is_some())
            .field("order", &self.order)
            .finish()
    }
}

impl<S, M, C> UnionMoveSelector<S, M, C> {
    /// Creates a union over `children` in original order.
    pub fn new(children: Vec<C>) -> Self {
        let fixed_weights = vec![1.0; children.len()];
        Self {
            children,
            fixed_weights,
            weight_factory: None,
            order: SelectionOrder::Original,
            rng: SelectorRng::default(),
            _phantom: PhantomData,
        }
    }

    pub fn with_order(mut self, order: SelectionOrder, rng: SelectorRng) -> Self {
        self.order = order;
        self.rng = rng;
        self
    }

    /// Sets per-child weights used when no weight factory is configured.
    ///
    /// Missing entries default to `1.0`.
    pub fn with_fixed_weights(mut self, weights: Vec<f64>) -> Self {
        self.fixed_weights = (0..self.children.len())
            .map(|i| weights.get(i).copied().unwrap_or(1.0))
            .collect();
        self
    }

    pub fn with_weight_factory(
        mut self,
        factory: Arc<dyn SelectionProbabilityWeightFactory<S>>,
    ) -> Self {
        self.weight_factory = Some(factory);
        self
    }

    pub fn children(&self) -> &[C] {
        &self.children
    }

    fn weights(&self, solution: &S) -> Vec<f64> {
        match &self.weight_factory {
            Some(factory) => (0..self.children.len())
                .map(|i| factory.weight(solution, i))
                .collect(),
            None => self.fixed_weights.clone(),
        }
    }
}

impl<S, M, C> MoveSelector<S, M> for UnionMoveSelector<S, M, C>
where
    S: PlanningSolution,
    M: Move<S> + 'static,
    C: MoveSelector<S, M>,
{
    fn iter_moves<'a, D: ScoreDirector<S> + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = M> + 'a> {
        match self.order {
            SelectionOrder::Original => Box::new(
                self.children
                    .iter()
                    .flat_map(move |child| child.iter_moves(score_director)),
            ),
            SelectionOrder::Random => {
                let weights = normalized(self.weights(score_director.working_solution()));
                let mut live: Vec<(f64, Box<dyn Iterator<Item = M> + 'a>)> = self
                    .children
                    .iter()
                    .zip(weights)
                    .filter(|(_, weight)| *weight > 0.0)
                    .map(|(child, weight)| (weight, child.iter_moves(score_director)))
                    .collect();
                let mut rng = self.rng.restart();

                Box::new(std::iter::from_fn(move || loop {
                    let total: f64 = live.iter().map(|(weight, _)| weight).sum();
                    if live.is_empty() || total <= 0.0 {
                        return None;
                    }
                    let mut pick = rng.random_range(0.0..total);
                    let mut chosen = live.len() - 1;
                    for (i, (weight, _)) in live.iter().enumerate() {
                        if pick < *weight {
                            chosen = i;
                            break;
                        }
                        pick -= weight;
                    }
                    match live[chosen].1.next() {
                        Some(m) => return Some(m),
                        None => drop(live.remove(chosen)),
                    }
                }))
            }
        }
    }

    fn size<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> usize {
        self.children
            .iter()
            .map(|child| child.size(score_director))
            .sum()
    }

    fn is_never_ending(&self) -> bool {
        self.children.iter().any(|child| child.is_never_ending())
    }
}

/// Scales usable weights into `(0, 1]` so their sum stays finite.
///
/// Non-finite and non-positive weights become `0.0`.
fn normalized(mut weights: Vec<f64>) -> Vec<f64> {
    for weight in weights.iter_mut() {
        if !weight.is_finite() || *weight <= 0.0 {
            *weight = 0.0;
        }
    }
    let max = weights.iter().copied().fold(0.0, f64::max);
    if max > 0.0 {
        for weight in weights.iter_mut() {
            *weight /= max;
        }
    }
    weights
}
