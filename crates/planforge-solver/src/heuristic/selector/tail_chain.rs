//! Tail chain swap move selector.

use std::fmt::Debug;

use planforge_config::SelectionOrder;
use planforge_core::domain::{ChainIndex, ChainLink, ChainedVariable, PlanningSolution};
use planforge_scoring::ScoreDirector;
use rand::Rng;

use crate::heuristic::r#move::TailChainSwapMove;

use super::random::SelectorRng;
use super::sub_chain::all_links;
use super::MoveSelector;

/// Yields a tail swap for every assigned entity and every other link.
///
/// The entity's own link and its current predecessor are skipped, since
/// they yield a cycle or a no-op.
pub struct TailChainSwapMoveSelector<S> {
    variable: ChainedVariable<S>,
    order: SelectionOrder,
    rng: SelectorRng,
}

impl<S> Debug for TailChainSwapMoveSelector<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TailChainSwapMoveSelector")
            .field("variable", &self.variable)
            .field("order", &self.order)
            .finish()
    }
}

impl<S> TailChainSwapMoveSelector<S> {
    pub fn new(variable: ChainedVariable<S>) -> Self {
        Self {
            variable,
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

fn is_target(index: &ChainIndex, left: usize, link: ChainLink) -> bool {
    link != ChainLink::Entity(left) && index.previous_link(left) != Some(link)
}

impl<S: PlanningSolution> MoveSelector<S, TailChainSwapMove<S>> for TailChainSwapMoveSelector<S> {
    fn iter_moves<'a, D: ScoreDirector<S> + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = TailChainSwapMove<S>> + 'a> {
        let Ok(index) = ChainIndex::build(score_director.working_solution(), &self.variable) else {
            return Box::new(std::iter::empty());
        };
        let links = all_links(&index);
        let entities: Vec<usize> = index.chains().iter().flatten().copied().collect();
        let variable = self.variable;

        match self.order {
            SelectionOrder::Original => Box::new(
                entities
                    .into_iter()
                    .flat_map(move |left| links.clone().into_iter().map(move |link| (left, link)))
                    .filter(move |&(left, link)| is_target(&index, left, link))
                    .map(move |(left, link)| TailChainSwapMove::new(variable, left, link)),
            ),
            SelectionOrder::Random => {
                // Each entity excludes exactly two links.
                if entities.is_empty() || links.len() < 3 {
                    return Box::new(std::iter::empty());
                }
                let mut rng = self.rng.restart();
                Box::new(std::iter::from_fn(move || loop {
                    let left = entities[rng.random_range(0..entities.len())];
                    let link = links[rng.random_range(0..links.len())];
                    if is_target(&index, left, link) {
                        return Some(TailChainSwapMove::new(variable, left, link));
                    }
                }))
            }
        }
    }

    fn size<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> usize {
        let Ok(index) = ChainIndex::build(score_director.working_solution(), &self.variable) else {
            return 0;
        };
        let entity_count: usize = index.chains().iter().map(Vec::len).sum();
        entity_count * all_links(&index).len().saturating_sub(2)
    }

    fn is_never_ending(&self) -> bool {
        self.order == SelectionOrder::Random
    }
}
