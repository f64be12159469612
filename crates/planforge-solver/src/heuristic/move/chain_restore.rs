//! Link rewriting shared by the chained moves.
//!
//! Chain moves plan their effect on a copy of the chains held by a
//! [`ChainIndex`], then diff the rewritten chains against the current links.
//! Only entities whose predecessor actually changes are touched.

use std::fmt::Debug;

use planforge_core::domain::{link_before, ChainIndex, ChainLink, ChainedVariable, PlanningSolution};
use planforge_core::error::{PlanForgeError, Result};
use planforge_scoring::ScoreDirector;

use super::Move;

/// New predecessor links of the entities a chain move touches.
pub type LinkChanges = Vec<(usize, Option<ChainLink>)>;

/// Diffs rewritten chains against the links recorded in the index.
pub(crate) fn diff_links(index: &ChainIndex, new_chains: &[Vec<usize>]) -> LinkChanges {
    let mut changes = Vec::new();
    for (anchor, chain) in new_chains.iter().enumerate() {
        for (position, &entity) in chain.iter().enumerate() {
            let link = link_before(anchor, chain, position);
            if index.previous_link(entity) != Some(link) {
                changes.push((entity, Some(link)));
            }
        }
    }
    changes
}

/// Returns `(anchor, split)` such that inserting at `split` places entities after `link`.
pub(crate) fn split_in(chains: &[Vec<usize>], link: ChainLink) -> Result<(usize, usize)> {
    match link {
        ChainLink::Anchor(anchor) if anchor < chains.len() => Ok((anchor, 0)),
        ChainLink::Anchor(anchor) => Err(PlanForgeError::Structural(format!(
            "unknown anchor {}",
            anchor
        ))),
        ChainLink::Entity(entity) => chains
            .iter()
            .enumerate()
            .find_map(|(anchor, chain)| {
                chain
                    .iter()
                    .position(|&e| e == entity)
                    .map(|position| (anchor, position + 1))
            })
            .ok_or_else(|| {
                PlanForgeError::Structural(format!("link target {} is unassigned", entity))
            }),
    }
}

/// Writes link changes through the director, registering an undo.
pub(crate) fn apply_links<S, D>(
    variable: &ChainedVariable<S>,
    changes: &[(usize, Option<ChainLink>)],
    score_director: &mut D,
) where
    S: PlanningSolution,
    D: ScoreDirector<S> + ?Sized,
{
    if changes.is_empty() {
        return;
    }
    let old_links: LinkChanges = changes
        .iter()
        .map(|&(entity, _)| (entity, variable.get(score_director.working_solution(), entity)))
        .collect();

    let descriptor_index = variable.descriptor_index();
    let variable_name = variable.variable_name();
    for &(entity, _) in changes {
        score_director.before_variable_changed(descriptor_index, entity, variable_name);
    }
    for &(entity, link) in changes {
        variable.set(score_director.working_solution_mut(), entity, link);
    }
    for &(entity, _) in changes {
        score_director.after_variable_changed(descriptor_index, entity, variable_name);
    }

    let setter = variable.setter();
    score_director.register_undo(Box::new(move |s: &mut S| {
        for (entity, link) in old_links {
            setter(s, entity, link);
        }
    }));
}

/// Snapshots the current links of the entities a plan would touch.
pub(crate) fn snapshot<S, D>(
    variable: &ChainedVariable<S>,
    plan: Result<LinkChanges>,
    score_director: &D,
) -> ChainRestoreMove<S>
where
    S: PlanningSolution,
    D: ScoreDirector<S> + ?Sized,
{
    let links = plan
        .unwrap_or_default()
        .into_iter()
        .map(|(entity, _)| (entity, variable.get(score_director.working_solution(), entity)))
        .collect();
    ChainRestoreMove::new(*variable, links)
}

/// Restores a snapshot of predecessor links.
///
/// This is the inverse of every chained move.
pub struct ChainRestoreMove<S> {
    variable: ChainedVariable<S>,
    links: LinkChanges,
    entities: Vec<usize>,
}

impl<S> Clone for ChainRestoreMove<S> {
    fn clone(&self) -> Self {
        Self {
            variable: self.variable,
            links: self.links.clone(),
            entities: self.entities.clone(),
        }
    }
}

impl<S> Debug for ChainRestoreMove<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainRestoreMove")
            .field("variable_name", &self.variable.variable_name())
            .field("links", &self.links)
            .finish()
    }
}

impl<S> ChainRestoreMove<S> {
    pub fn new(variable: ChainedVariable<S>, links: LinkChanges) -> Self {
        let entities = links.iter().map(|&(entity, _)| entity).collect();
        Self {
            variable,
            links,
            entities,
        }
    }

    /// Returns the links this move writes.
    pub fn links(&self) -> &[(usize, Option<ChainLink>)] {
        &self.links
    }
}

impl<S: PlanningSolution> Move<S> for ChainRestoreMove<S> {
    type Undo = ChainRestoreMove<S>;

    fn is_doable<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> bool {
        let solution = score_director.working_solution();
        self.links
            .iter()
            .any(|&(entity, link)| self.variable.get(solution, entity) != link)
    }

    fn do_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &mut D) {
        apply_links(&self.variable, &self.links, score_director);
    }

    fn undo_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> Self::Undo {
        snapshot(&self.variable, Ok(self.links.clone()), score_director)
    }

    fn descriptor_index(&self) -> usize {
        self.variable.descriptor_index()
    }

    fn entity_indices(&self) -> &[usize] {
        &self.entities
    }

    fn variable_name(&self) -> &str {
        self.variable.variable_name()
    }
}
