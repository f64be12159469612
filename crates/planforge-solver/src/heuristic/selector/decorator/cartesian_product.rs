//! Cartesian product move selector.
//!
//! Every combination of one move per child is yielded as a single
//! [`CompositeMove`], applied atomically. Children are assumed independent:
//! a later child's moves are generated against the solution as it is, not
//! as the earlier children would leave it.

use std::fmt::Debug;
use std::marker::PhantomData;

use planforge_config::SelectionOrder;
use planforge_core::domain::PlanningSolution;
use planforge_scoring::ScoreDirector;

use crate::heuristic::r#move::{CompositeMove, Move};
use crate::heuristic::selector::MoveSelector;

/// Yields the n-ary cross product of its children's moves.
pub struct CartesianProductMoveSelector<S, M, C> {
    children: Vec<C>,
    ignore_empty_child_iterators: bool,
    order: SelectionOrder,
    _phantom: PhantomData<(fn() -> S, fn() -> M)>,
}

impl<S, M, C: Debug> Debug for CartesianProductMoveSelector<S, M, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartesianProductMoveSelector")
            .field("children", &self.children)
            .field(
                "ignore_empty_child_iterators",
                &self.ignore_empty_child_iterators,
            )
            .field("order", &self.order)
            .finish()
    }
}

impl<S, M, C> CartesianProductMoveSelector<S, M, C> {
    pub fn new(children: Vec<C>) -> Self {
        Self {
            children,
            ignore_empty_child_iterators: false,
            order: SelectionOrder::Original,
            _phantom: PhantomData,
        }
    }

    /// Skips children that yield no moves instead of yielding nothing.
    pub fn with_ignore_empty_child_iterators(mut self, ignore: bool) -> Self {
        self.ignore_empty_child_iterators = ignore;
        self
    }

    /// Sets the selection order.
    ///
    /// In random order each combination takes the next move of every child,
    /// so the children decide the randomness.
    pub fn with_order(mut self, order: SelectionOrder) -> Self {
        self.order = order;
        self
    }

    pub fn children(&self) -> &[C] {
        &self.children
    }
}

impl<S, M, C> MoveSelector<S, CompositeMove<S, M>> for CartesianProductMoveSelector<S, M, C>
where
    S: PlanningSolution,
    M: Move<S> + Clone + 'static,
    C: MoveSelector<S, M>,
{
    fn iter_moves<'a, D: ScoreDirector<S> + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = CompositeMove<S, M>> + 'a> {
        match self.order {
            SelectionOrder::Original => {
                let mut pools: Vec<Vec<M>> = self
                    .children
                    .iter()
                    .map(|child| child.iter_moves(score_director).collect())
                    .collect();
                if self.ignore_empty_child_iterators {
                    pools.retain(|pool| !pool.is_empty());
                }
                if pools.is_empty() || pools.iter().any(|pool| pool.is_empty()) {
                    return Box::new(std::iter::empty());
                }
                Box::new(Odometer::new(pools))
            }
            SelectionOrder::Random => {
                let mut iterators: Vec<Box<dyn Iterator<Item = M> + 'a>> = self
                    .children
                    .iter()
                    .map(|child| child.iter_moves(score_director))
                    .collect();
                let ignore_empty = self.ignore_empty_child_iterators;
                Box::new(std::iter::from_fn(move || {
                    let mut moves = Vec::with_capacity(iterators.len());
                    for iterator in &mut iterators {
                        match iterator.next() {
                            Some(m) => moves.push(m),
                            None if ignore_empty => {}
                            None => return None,
                        }
                    }
                    if moves.is_empty() {
                        None
                    } else {
                        Some(CompositeMove::new(moves))
                    }
                }))
            }
        }
    }

    fn size<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> usize {
        let sizes = self.children.iter().map(|child| child.size(score_director));
        if self.ignore_empty_child_iterators {
            let non_empty: Vec<usize> = sizes.filter(|&size| size > 0).collect();
            if non_empty.is_empty() {
                0
            } else {
                non_empty.into_iter().product()
            }
        } else if self.children.is_empty() {
            0
        } else {
            sizes.product()
        }
    }

    fn is_never_ending(&self) -> bool {
        self.order == SelectionOrder::Random
            && self.children.iter().all(|child| child.is_never_ending())
    }
}

/// Walks every index combination of the pools, last pool fastest.
struct Odometer<S, M> {
    pools: Vec<Vec<M>>,
    positions: Vec<usize>,
    done: bool,
    _phantom: PhantomData<fn() -> S>,
}

impl<S, M> Odometer<S, M> {
    fn new(pools: Vec<Vec<M>>) -> Self {
        let positions = vec![0; pools.len()];
        Self {
            pools,
            positions,
            done: false,
            _phantom: PhantomData,
        }
    }
}

impl<S, M> Iterator for Odometer<S, M>
where
    S: PlanningSolution,
    M: Move<S> + Clone,
{
    type Item = CompositeMove<S, M>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let moves = self
            .positions
            .iter()
            .zip(&self.pools)
            .map(|(&position, pool)| pool[position].clone())
            .collect();

        self.done = true;
        for (position, pool) in self.positions.iter_mut().zip(&self.pools).rev() {
            *position += 1;
            if *position < pool.len() {
                self.done = false;
                break;
            }
            *position = 0;
        }
        Some(CompositeMove::new(moves))
    }
}
