//! Sub chain move selectors for chained variables.
//!
//! Both selectors snapshot the chains with a [`ChainIndex`] at the start of
//! every pass. Malformed chains yield no moves.

use std::fmt::Debug;

use planforge_config::SelectionOrder;
use planforge_core::domain::{ChainIndex, ChainLink, ChainedVariable, PlanningSolution, SubChain};
use planforge_scoring::ScoreDirector;
use rand::rngs::StdRng;
use rand::Rng;

use crate::heuristic::r#move::{SubChainChangeMove, SubChainSwapMove};

use super::random::SelectorRng;
use super::MoveSelector;

/// Bounds on the length of selected sub chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubChainSizes {
    pub minimum: usize,
    pub maximum: usize,
}

impl Default for SubChainSizes {
    fn default() -> Self {
        Self {
            minimum: 1,
            maximum: usize::MAX,
        }
    }
}

impl SubChainSizes {
    pub fn new(minimum: Option<usize>, maximum: Option<usize>) -> Self {
        let defaults = Self::default();
        Self {
            minimum: minimum.unwrap_or(defaults.minimum).max(1),
            maximum: maximum.unwrap_or(defaults.maximum),
        }
    }

    /// Every sub chain of every chain, by chain, start position, then length.
    pub fn sub_chains(&self, index: &ChainIndex) -> Vec<SubChain> {
        let mut sub_chains = Vec::new();
        for chain in index.chains() {
            for start in 0..chain.len() {
                let max = self.maximum.min(chain.len() - start);
                for size in self.minimum..=max {
                    sub_chains.push(SubChain::new(chain[start..start + size].to_vec()));
                }
            }
        }
        sub_chains
    }

    /// Samples a sub chain from a random chain long enough to hold one.
    pub fn sample(&self, index: &ChainIndex, rng: &mut StdRng) -> Option<SubChain> {
        let eligible: Vec<&Vec<usize>> = index
            .chains()
            .iter()
            .filter(|chain| chain.len() >= self.minimum)
            .collect();
        if eligible.is_empty() || self.maximum < self.minimum {
            return None;
        }
        let chain = eligible[rng.random_range(0..eligible.len())];
        let size = rng.random_range(self.minimum..=self.maximum.min(chain.len()));
        let start = rng.random_range(0..=chain.len() - size);
        Some(SubChain::new(chain[start..start + size].to_vec()))
    }
}

/// Every link an entity can follow: all anchors, then all assigned entities.
pub(crate) fn all_links(index: &ChainIndex) -> Vec<ChainLink> {
    (0..index.anchor_count())
        .map(ChainLink::Anchor)
        .chain(index.chains().iter().flatten().map(|&e| ChainLink::Entity(e)))
        .collect()
}

fn link_in(sub_chain: &SubChain, link: ChainLink) -> bool {
    matches!(link, ChainLink::Entity(entity) if sub_chain.contains(entity))
}

/// Yields moves relocating each sub chain after every link outside it.
pub struct SubChainChangeMoveSelector<S> {
    variable: ChainedVariable<S>,
    sizes: SubChainSizes,
    select_reversing_move_too: bool,
    order: SelectionOrder,
    rng: SelectorRng,
}

impl<S> Debug for SubChainChangeMoveSelector<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubChainChangeMoveSelector")
            .field("variable", &self.variable)
            .field("sizes", &self.sizes)
            .field("select_reversing_move_too", &self.select_reversing_move_too)
            .field("order", &self.order)
            .finish()
    }
}

impl<S> SubChainChangeMoveSelector<S> {
    pub fn new(variable: ChainedVariable<S>, sizes: SubChainSizes) -> Self {
        Self {
            variable,
            sizes,
            select_reversing_move_too: false,
            order: SelectionOrder::Original,
            rng: SelectorRng::default(),
        }
    }

    /// Also yields the reversed variant of every multi-entity sub chain.
    pub fn with_reversing(mut self, select_reversing_move_too: bool) -> Self {
        self.select_reversing_move_too = select_reversing_move_too;
        self
    }

    pub fn with_order(mut self, order: SelectionOrder, rng: SelectorRng) -> Self {
        self.order = order;
        self.rng = rng;
        self
    }

    fn reversals(&self, sub_chain: &SubChain) -> &'static [bool] {
        if self.select_reversing_move_too && sub_chain.len() > 1 {
            &[false, true]
        } else {
            &[false]
        }
    }
}

impl<S: PlanningSolution> MoveSelector<S, SubChainChangeMove<S>> for SubChainChangeMoveSelector<S> {
    fn iter_moves<'a, D: ScoreDirector<S> + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = SubChainChangeMove<S>> + 'a> {
        let Ok(index) = ChainIndex::build(score_director.working_solution(), &self.variable) else {
            return Box::new(std::iter::empty());
        };
        let links = all_links(&index);
        let variable = self.variable;

        match self.order {
            SelectionOrder::Original => {
                let sub_chains = self.sizes.sub_chains(&index);
                Box::new(sub_chains.into_iter().flat_map(move |sub_chain| {
                    let targets: Vec<ChainLink> = links
                        .iter()
                        .copied()
                        .filter(|&link| !link_in(&sub_chain, link))
                        .collect();
                    let reversals = self.reversals(&sub_chain);
                    targets.into_iter().flat_map(move |link| {
                        let sub_chain = sub_chain.clone();
                        reversals.iter().map(move |&reversing| {
                            SubChainChangeMove::new(variable, sub_chain.clone(), link, reversing)
                        })
                    })
                }))
            }
            SelectionOrder::Random => {
                let mut rng = self.rng.restart();
                Box::new(std::iter::from_fn(move || {
                    let sub_chain = self.sizes.sample(&index, &mut rng)?;
                    // Anchors are never inside a sub chain, so this terminates.
                    let link = loop {
                        let link = links[rng.random_range(0..links.len())];
                        if !link_in(&sub_chain, link) {
                            break link;
                        }
                    };
                    let reversing =
                        self.select_reversing_move_too && sub_chain.len() > 1 && rng.random_bool(0.5);
                    Some(SubChainChangeMove::new(variable, sub_chain, link, reversing))
                }))
            }
        }
    }

    fn size<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> usize {
        let Ok(index) = ChainIndex::build(score_director.working_solution(), &self.variable) else {
            return 0;
        };
        let link_count = all_links(&index).len();
        self.sizes
            .sub_chains(&index)
            .iter()
            .map(|sub_chain| (link_count - sub_chain.len()) * self.reversals(sub_chain).len())
            .sum()
    }

    fn is_never_ending(&self) -> bool {
        self.order == SelectionOrder::Random
    }
}

/// Yields swaps between every pair of non-overlapping sub chains.
pub struct SubChainSwapMoveSelector<S> {
    variable: ChainedVariable<S>,
    sizes: SubChainSizes,
    select_reversing_move_too: bool,
    order: SelectionOrder,
    rng: SelectorRng,
}

impl<S> Debug for SubChainSwapMoveSelector<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubChainSwapMoveSelector")
            .field("variable", &self.variable)
            .field("sizes", &self.sizes)
            .field("select_reversing_move_too", &self.select_reversing_move_too)
            .field("order", &self.order)
            .finish()
    }
}

impl<S> SubChainSwapMoveSelector<S> {
    pub fn new(variable: ChainedVariable<S>, sizes: SubChainSizes) -> Self {
        Self {
            variable,
            sizes,
            select_reversing_move_too: false,
            order: SelectionOrder::Original,
            rng: SelectorRng::default(),
        }
    }

    /// Also yields the variant reversing both sub chains.
    pub fn with_reversing(mut self, select_reversing_move_too: bool) -> Self {
        self.select_reversing_move_too = select_reversing_move_too;
        self
    }

    pub fn with_order(mut self, order: SelectionOrder, rng: SelectorRng) -> Self {
        self.order = order;
        self.rng = rng;
        self
    }

    fn reversals(&self) -> &'static [bool] {
        if self.select_reversing_move_too {
            &[false, true]
        } else {
            &[false]
        }
    }
}

impl<S: PlanningSolution> MoveSelector<S, SubChainSwapMove<S>> for SubChainSwapMoveSelector<S> {
    fn iter_moves<'a, D: ScoreDirector<S> + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = SubChainSwapMove<S>> + 'a> {
        let Ok(index) = ChainIndex::build(score_director.working_solution(), &self.variable) else {
            return Box::new(std::iter::empty());
        };
        let sub_chains = self.sizes.sub_chains(&index);
        let variable = self.variable;
        let reversals = self.reversals();

        match self.order {
            SelectionOrder::Original => {
                let count = sub_chains.len();
                Box::new(
                    (0..count)
                        .flat_map(move |i| (i + 1..count).map(move |j| (i, j)))
                        .filter_map(move |(i, j)| {
                            let (left, right) = (&sub_chains[i], &sub_chains[j]);
                            (!left.overlaps(right)).then(|| (left.clone(), right.clone()))
                        })
                        .flat_map(move |(left, right)| {
                            reversals.iter().map(move |&reversing| {
                                SubChainSwapMove::new(variable, left.clone(), right.clone(), reversing)
                            })
                        }),
                )
            }
            SelectionOrder::Random => {
                let has_disjoint_pair = sub_chains.iter().enumerate().any(|(i, left)| {
                    sub_chains[i + 1..].iter().any(|right| !left.overlaps(right))
                });
                if !has_disjoint_pair {
                    return Box::new(std::iter::empty());
                }
                let mut rng = self.rng.restart();
                Box::new(std::iter::from_fn(move || loop {
                    let left = &sub_chains[rng.random_range(0..sub_chains.len())];
                    let right = &sub_chains[rng.random_range(0..sub_chains.len())];
                    if left.overlaps(right) {
                        continue;
                    }
                    let reversing = reversals.len() > 1 && rng.random_bool(0.5);
                    return Some(SubChainSwapMove::new(
                        variable,
                        left.clone(),
                        right.clone(),
                        reversing,
                    ));
                }))
            }
        }
    }

    fn size<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> usize {
        let Ok(index) = ChainIndex::build(score_director.working_solution(), &self.variable) else {
            return 0;
        };
        let sub_chains = self.sizes.sub_chains(&index);
        let mut pairs = 0;
        for (i, left) in sub_chains.iter().enumerate() {
            pairs += sub_chains[i + 1..]
                .iter()
                .filter(|right| !left.overlaps(right))
                .count();
        }
        pairs * self.reversals().len()
    }

    fn is_never_ending(&self) -> bool {
        self.order == SelectionOrder::Random
    }
}
