//! Chain index for chained planning variables.
//!
//! Answers "which anchor roots this entity?", "what comes next?" and
//! "where in its chain is it?" in O(1) after a single O(n) build.
//!
//! Building the index also validates chain well-formedness: every assigned
//! entity must be reachable from exactly one anchor, no link may have two
//! successors, and no cycle may exist.

use crate::error::{PlanForgeError, Result};

use super::variable::{ChainLink, ChainedVariable};

/// Index-based view of all chains of a solution.
///
/// Entities and anchors are referenced by index into their respective
/// collections. Unassigned entities belong to no chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainIndex {
    /// Entities of each anchor's chain, in chain order.
    chains: Vec<Vec<usize>>,
    /// `entity -> (anchor, position)`; `None` when unassigned.
    positions: Vec<Option<(usize, usize)>>,
}

impl ChainIndex {
    /// Builds the index from the current solution state.
    ///
    /// # Errors
    ///
    /// Returns [`PlanForgeError::Structural`] when a link points outside the
    /// solution, two entities share a predecessor, an entity follows an
    /// unassigned entity, or a cycle is not rooted at any anchor.
    pub fn build<S>(solution: &S, variable: &ChainedVariable<S>) -> Result<Self> {
        let entity_count = variable.entity_count(solution);
        let anchor_count = variable.anchor_count(solution);

        let mut anchor_successor: Vec<Option<usize>> = vec![None; anchor_count];
        let mut entity_successor: Vec<Option<usize>> = vec![None; entity_count];
        let mut assigned = vec![false; entity_count];

        for entity in 0..entity_count {
            let link = match variable.get(solution, entity) {
                Some(link) => link,
                None => continue,
            };
            assigned[entity] = true;

            let slot = match link {
                ChainLink::Anchor(anchor) => anchor_successor.get_mut(anchor).ok_or_else(|| {
                    structural(format!(
                        "entity {} points at unknown anchor {}",
                        entity, anchor
                    ))
                })?,
                ChainLink::Entity(previous) => {
                    if previous == entity {
                        return Err(structural(format!("entity {} points at itself", entity)));
                    }
                    if previous < entity_count && variable.get(solution, previous).is_none() {
                        return Err(structural(format!(
                            "entity {} follows unassigned entity {}",
                            entity, previous
                        )));
                    }
                    entity_successor.get_mut(previous).ok_or_else(|| {
                        structural(format!(
                            "entity {} points at unknown entity {}",
                            entity, previous
                        ))
                    })?
                }
            };

            if let Some(other) = slot.replace(entity) {
                return Err(structural(format!(
                    "{:?} has two successors: {} and {}",
                    link, other, entity
                )));
            }
        }

        let mut positions = vec![None; entity_count];
        let mut chains = Vec::with_capacity(anchor_count);
        for (anchor, first) in anchor_successor.iter().enumerate() {
            let mut chain = Vec::new();
            let mut current = *first;
            while let Some(entity) = current {
                positions[entity] = Some((anchor, chain.len()));
                chain.push(entity);
                current = entity_successor[entity];
            }
            chains.push(chain);
        }

        if let Some(orphan) = (0..entity_count).find(|&e| assigned[e] && positions[e].is_none()) {
            return Err(structural(format!(
                "entity {} is part of a cycle not rooted at any anchor",
                orphan
            )));
        }

        Ok(Self { chains, positions })
    }

    /// Returns the number of anchors (and therefore chains).
    pub fn anchor_count(&self) -> usize {
        self.chains.len()
    }

    /// Returns all chains, indexed by anchor.
    pub fn chains(&self) -> &[Vec<usize>] {
        &self.chains
    }

    /// Returns the chain rooted at the anchor, in chain order.
    pub fn chain(&self, anchor: usize) -> &[usize] {
        self.chains.get(anchor).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `(anchor, position)` of an assigned entity.
    #[inline]
    pub fn locate(&self, entity: usize) -> Option<(usize, usize)> {
        self.positions.get(entity).copied().flatten()
    }

    /// Returns the anchor rooting the entity's chain.
    #[inline]
    pub fn anchor_of(&self, entity: usize) -> Option<usize> {
        self.locate(entity).map(|(anchor, _)| anchor)
    }

    /// Returns the entity following this one, if any.
    pub fn next(&self, entity: usize) -> Option<usize> {
        let (anchor, position) = self.locate(entity)?;
        self.chains[anchor].get(position + 1).copied()
    }

    /// Returns the predecessor link of an assigned entity.
    pub fn previous_link(&self, entity: usize) -> Option<ChainLink> {
        let (anchor, position) = self.locate(entity)?;
        Some(link_before(anchor, &self.chains[anchor], position))
    }

    /// Resolves a link to `(anchor, number of entities up to and including it)`.
    ///
    /// Inserting after the link means inserting at the returned split point.
    pub fn split_point(&self, link: ChainLink) -> Option<(usize, usize)> {
        match link {
            ChainLink::Anchor(anchor) if anchor < self.chains.len() => Some((anchor, 0)),
            ChainLink::Anchor(_) => None,
            ChainLink::Entity(entity) => self
                .locate(entity)
                .map(|(anchor, position)| (anchor, position + 1)),
        }
    }

    /// Validates that the entities form a contiguous segment of one chain.
    ///
    /// Returns `(anchor, start position)` of the segment.
    pub fn locate_sub_chain(&self, sub_chain: &SubChain) -> Result<(usize, usize)> {
        let first = sub_chain
            .first()
            .ok_or_else(|| structural("empty sub chain".to_string()))?;
        let (anchor, start) = self.locate(first).ok_or_else(|| {
            structural(format!("sub chain starts at unassigned entity {}", first))
        })?;
        let chain = &self.chains[anchor];
        let end = start + sub_chain.len();
        if end > chain.len() || chain[start..end] != *sub_chain.entities() {
            return Err(structural(format!(
                "{:?} is not a contiguous segment of the chain of anchor {}",
                sub_chain.entities(),
                anchor
            )));
        }
        Ok((anchor, start))
    }
}

/// Returns the link preceding `chain[position]`.
pub fn link_before(anchor: usize, chain: &[usize], position: usize) -> ChainLink {
    if position == 0 {
        ChainLink::Anchor(anchor)
    } else {
        ChainLink::Entity(chain[position - 1])
    }
}

/// A contiguous run of entities within one chain, in chain order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubChain {
    entities: Vec<usize>,
}

impl SubChain {
    pub fn new(entities: Vec<usize>) -> Self {
        Self { entities }
    }

    pub fn entities(&self) -> &[usize] {
        &self.entities
    }

    pub fn first(&self) -> Option<usize> {
        self.entities.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.entities.last().copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, entity: usize) -> bool {
        self.entities.contains(&entity)
    }

    /// Returns true if both sub chains share an entity.
    pub fn overlaps(&self, other: &SubChain) -> bool {
        self.entities.iter().any(|e| other.contains(*e))
    }
}

fn structural(message: String) -> PlanForgeError {
    PlanForgeError::Structural(message)
}
