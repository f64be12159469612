//! Pillar selectors for groups of entities with the same variable values.
//!
//! A pillar is a group of entities that share the same planning variable
//! value (or, across several variables, the same tuple of values). Pillar
//! moves operate on entire pillars, changing or swapping all entities in
//! the pillar atomically. Unassigned entities never form pillars.

use std::fmt::Debug;

use planforge_config::SelectionOrder;
use planforge_core::domain::{BasicVariable, PlanningSolution};
use planforge_scoring::ScoreDirector;
use rand::rngs::StdRng;
use rand::Rng;

use crate::heuristic::r#move::{CompositeMove, GenericMove, PillarChangeMove, PillarSwapMove};

use super::random::SelectorRng;
use super::MoveSelector;

/// A group of entities holding the same values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pillar {
    /// Index of the value group the pillar was taken from.
    pub group: usize,
    pub entities: Vec<usize>,
}

impl Pillar {
    pub fn new(group: usize, entities: Vec<usize>) -> Self {
        Self { group, entities }
    }

    pub fn size(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Sub-pillar selection.
///
/// A sub-pillar is a contiguous run of a pillar's entities (in entity
/// order) whose length lies within `minimum_size..=maximum_size`. Original
/// order enumerates every such run; random order samples one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubPillarConfig {
    pub enabled: bool,
    pub minimum_size: usize,
    pub maximum_size: usize,
}

impl Default for SubPillarConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            minimum_size: 1,
            maximum_size: usize::MAX,
        }
    }
}

impl SubPillarConfig {
    /// Whole pillars only.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every sub-pillar size.
    pub fn all() -> Self {
        Self {
            enabled: true,
            minimum_size: 1,
            maximum_size: usize::MAX,
        }
    }

    pub fn with_minimum_size(mut self, size: usize) -> Self {
        self.minimum_size = size.max(1);
        self
    }

    pub fn with_maximum_size(mut self, size: usize) -> Self {
        self.maximum_size = size;
        self
    }

    fn size_range(&self, pillar_len: usize) -> Option<(usize, usize)> {
        if !self.enabled {
            return (pillar_len >= self.minimum_size).then_some((pillar_len, pillar_len));
        }
        let max = self.maximum_size.min(pillar_len);
        (self.minimum_size <= max).then_some((self.minimum_size, max))
    }
}

impl From<&planforge_config::SubPillarConfig> for SubPillarConfig {
    fn from(config: &planforge_config::SubPillarConfig) -> Self {
        let defaults = Self::default();
        Self {
            enabled: config.enabled.unwrap_or(defaults.enabled),
            minimum_size: config.minimum_size.unwrap_or(defaults.minimum_size).max(1),
            maximum_size: config.maximum_size.unwrap_or(defaults.maximum_size),
        }
    }
}

/// Groups entities into pillars by the values of one or more variables.
pub struct PillarSelector<S, V> {
    variables: Vec<BasicVariable<S, V>>,
    sub_pillar: SubPillarConfig,
}

impl<S, V> Debug for PillarSelector<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PillarSelector")
            .field("variables", &self.variables)
            .field("sub_pillar", &self.sub_pillar)
            .finish()
    }
}

impl<S, V> PillarSelector<S, V>
where
    V: Clone + PartialEq,
{
    pub fn new(variables: Vec<BasicVariable<S, V>>, sub_pillar: SubPillarConfig) -> Self {
        Self {
            variables,
            sub_pillar,
        }
    }

    pub fn variables(&self) -> &[BasicVariable<S, V>] {
        &self.variables
    }

    /// Returns the value groups, in order of first occurrence.
    ///
    /// Groups too small to yield any pillar are dropped.
    pub fn groups(&self, solution: &S) -> Vec<Vec<usize>> {
        let entity_count = self
            .variables
            .first()
            .map_or(0, |variable| variable.entity_count(solution));

        let mut keys: Vec<Vec<V>> = Vec::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for entity in 0..entity_count {
            let key: Option<Vec<V>> = self
                .variables
                .iter()
                .map(|variable| variable.get(solution, entity))
                .collect();
            let Some(key) = key else {
                continue;
            };
            match keys.iter().position(|k| *k == key) {
                Some(group) => groups[group].push(entity),
                None => {
                    keys.push(key);
                    groups.push(vec![entity]);
                }
            }
        }
        groups.retain(|group| self.sub_pillar.size_range(group.len()).is_some());
        groups
    }

    /// Returns every pillar in original order.
    ///
    /// Without sub-pillars these are the whole groups. With sub-pillars,
    /// every contiguous run of each allowed size, smallest first.
    pub fn pillars(&self, solution: &S) -> Vec<Pillar> {
        let mut pillars = Vec::new();
        for (index, group) in self.groups(solution).into_iter().enumerate() {
            let Some((min, max)) = self.sub_pillar.size_range(group.len()) else {
                continue;
            };
            for size in min..=max {
                for start in 0..=group.len() - size {
                    pillars.push(Pillar::new(index, group[start..start + size].to_vec()));
                }
            }
        }
        pillars
    }

    /// Samples a pillar from a group: a random size, then a random run of
    /// that size.
    pub fn sample(&self, group_index: usize, group: &[usize], rng: &mut StdRng) -> Pillar {
        match self.sub_pillar.size_range(group.len()) {
            Some((min, max)) if self.sub_pillar.enabled => {
                let size = rng.random_range(min..=max);
                let start = rng.random_range(0..=group.len() - size);
                Pillar::new(group_index, group[start..start + size].to_vec())
            }
            _ => Pillar::new(group_index, group.to_vec()),
        }
    }
}

/// Yields a [`PillarChangeMove`] for every pillar and every value.
pub struct PillarChangeMoveSelector<S, V> {
    pillars: PillarSelector<S, V>,
    variable: BasicVariable<S, V>,
    order: SelectionOrder,
    rng: SelectorRng,
}

impl<S, V> Debug for PillarChangeMoveSelector<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PillarChangeMoveSelector")
            .field("pillars", &self.pillars)
            .field("order", &self.order)
            .finish()
    }
}

impl<S, V> PillarChangeMoveSelector<S, V>
where
    V: Clone + PartialEq,
{
    pub fn new(variable: BasicVariable<S, V>, sub_pillar: SubPillarConfig) -> Self {
        Self {
            pillars: PillarSelector::new(vec![variable], sub_pillar),
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

impl<S, V> MoveSelector<S, PillarChangeMove<S, V>> for PillarChangeMoveSelector<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn iter_moves<'a, D: ScoreDirector<S> + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = PillarChangeMove<S, V>> + 'a> {
        let solution = score_director.working_solution();
        let values = self.variable.values(solution);
        if values.is_empty() {
            return Box::new(std::iter::empty());
        }
        let variable = self.variable;

        match self.order {
            SelectionOrder::Original => {
                let pillars = self.pillars.pillars(solution);
                Box::new(pillars.into_iter().flat_map(move |pillar| {
                    values
                        .clone()
                        .into_iter()
                        .filter_map(move |value| {
                            PillarChangeMove::try_new(
                                solution,
                                &pillar.entities,
                                Some(value),
                                &variable,
                            )
                            .ok()
                        })
                }))
            }
            SelectionOrder::Random => {
                let groups = self.pillars.groups(solution);
                if groups.is_empty() {
                    return Box::new(std::iter::empty());
                }
                let mut rng = self.rng.restart();
                Box::new(std::iter::from_fn(move || {
                    let index = rng.random_range(0..groups.len());
                    let pillar = self.pillars.sample(index, &groups[index], &mut rng);
                    let value = values[rng.random_range(0..values.len())].clone();
                    PillarChangeMove::try_new(solution, &pillar.entities, Some(value), &variable)
                        .ok()
                }))
            }
        }
    }

    fn size<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> usize {
        let solution = score_director.working_solution();
        self.pillars.pillars(solution).len() * self.variable.values(solution).len()
    }

    fn is_never_ending(&self) -> bool {
        self.order == SelectionOrder::Random
    }
}

/// Yields swaps between pairs of pillars holding different values.
///
/// With several variables both pillars exchange all of them, as one
/// composite move.
pub struct PillarSwapMoveSelector<S, V> {
    pillars: PillarSelector<S, V>,
    order: SelectionOrder,
    rng: SelectorRng,
}

impl<S, V> Debug for PillarSwapMoveSelector<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PillarSwapMoveSelector")
            .field("pillars", &self.pillars)
            .field("order", &self.order)
            .finish()
    }
}

impl<S, V> PillarSwapMoveSelector<S, V>
where
    V: Clone + PartialEq,
{
    pub fn new(variables: Vec<BasicVariable<S, V>>, sub_pillar: SubPillarConfig) -> Self {
        Self {
            pillars: PillarSelector::new(variables, sub_pillar),
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

impl<S, V> PillarSwapMoveSelector<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn swap(&self, solution: &S, left: &Pillar, right: &Pillar) -> Option<GenericMove<S, V>> {
        let mut moves = self
            .pillars
            .variables()
            .iter()
            .map(|variable| {
                PillarSwapMove::try_new(solution, &left.entities, &right.entities, variable)
                    .map(GenericMove::PillarSwap)
            })
            .collect::<Result<Vec<_>, _>>()
            .ok()?;
        if moves.len() == 1 {
            moves.pop()
        } else {
            Some(GenericMove::Composite(CompositeMove::new(moves)))
        }
    }
}

impl<S, V> MoveSelector<S, GenericMove<S, V>> for PillarSwapMoveSelector<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn iter_moves<'a, D: ScoreDirector<S> + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = GenericMove<S, V>> + 'a> {
        let solution = score_director.working_solution();

        match self.order {
            SelectionOrder::Original => {
                let pillars = self.pillars.pillars(solution);
                let count = pillars.len();
                Box::new(
                    (0..count)
                        .flat_map(move |i| (i + 1..count).map(move |j| (i, j)))
                        .filter_map(move |(i, j)| {
                            // Pillars of one group hold the same values.
                            if pillars[i].group == pillars[j].group {
                                return None;
                            }
                            self.swap(solution, &pillars[i], &pillars[j])
                        }),
                )
            }
            SelectionOrder::Random => {
                let groups = self.pillars.groups(solution);
                if groups.len() < 2 {
                    return Box::new(std::iter::empty());
                }
                let mut rng = self.rng.restart();
                Box::new(std::iter::from_fn(move || {
                    let left = rng.random_range(0..groups.len());
                    let mut right = rng.random_range(0..groups.len() - 1);
                    if right >= left {
                        right += 1;
                    }
                    let left = self.pillars.sample(left, &groups[left], &mut rng);
                    let right = self.pillars.sample(right, &groups[right], &mut rng);
                    self.swap(solution, &left, &right)
                }))
            }
        }
    }

    fn size<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> usize {
        let pillars = self.pillars.pillars(score_director.working_solution());
        let mut size = 0;
        for (i, left) in pillars.iter().enumerate() {
            size += pillars[i + 1..]
                .iter()
                .filter(|right| right.group != left.group)
                .count();
        }
        size
    }

    fn is_never_ending(&self) -> bool {
        self.order == SelectionOrder::Random
    }
}
