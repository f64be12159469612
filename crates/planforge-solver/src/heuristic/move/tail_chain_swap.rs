//! TailChainSwapMove - exchanges the tails of two chains.
//!
//! The tail starting at `left_entity` is attached after `right_link`, and
//! the tail that followed `right_link` is attached where `left_entity` was.
//! When both positions are in the same chain the segment between them is
//! reversed instead (2-opt).

use std::fmt::Debug;

use planforge_core::domain::{ChainIndex, ChainLink, ChainedVariable, PlanningSolution};
use planforge_core::error::{PlanForgeError, Result};
use planforge_scoring::ScoreDirector;

use super::chain_restore::{apply_links, diff_links, snapshot, ChainRestoreMove, LinkChanges};
use super::Move;

/// A move that swaps the tail starting at an entity with the tail after a link.
pub struct TailChainSwapMove<S> {
    variable: ChainedVariable<S>,
    left_entity: usize,
    right_link: ChainLink,
}

impl<S> Clone for TailChainSwapMove<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for TailChainSwapMove<S> {}

impl<S> Debug for TailChainSwapMove<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TailChainSwapMove")
            .field("left_entity", &self.left_entity)
            .field("right_link", &self.right_link)
            .field("variable_name", &self.variable.variable_name())
            .finish()
    }
}

impl<S> TailChainSwapMove<S> {
    /// Creates the move after checking it against the solution's chains.
    ///
    /// # Errors
    ///
    /// Returns [`PlanForgeError::Structural`] when the chains are malformed,
    /// `left_entity` is unassigned, `right_link` is unknown, or
    /// `right_link` is `left_entity` itself.
    pub fn try_new(
        solution: &S,
        variable: ChainedVariable<S>,
        left_entity: usize,
        right_link: ChainLink,
    ) -> Result<Self> {
        let mov = Self::new(variable, left_entity, right_link);
        let index = ChainIndex::build(solution, &variable)?;
        mov.plan(&index)?;
        Ok(mov)
    }

    /// Creates the move from parts already known to be valid.
    pub(crate) fn new(
        variable: ChainedVariable<S>,
        left_entity: usize,
        right_link: ChainLink,
    ) -> Self {
        Self {
            variable,
            left_entity,
            right_link,
        }
    }

    pub fn left_entity(&self) -> usize {
        self.left_entity
    }

    pub fn right_link(&self) -> ChainLink {
        self.right_link
    }

    fn plan(&self, index: &ChainIndex) -> Result<LinkChanges> {
        if self.right_link == ChainLink::Entity(self.left_entity) {
            return Err(PlanForgeError::Structural(format!(
                "cannot attach the tail of {} after itself",
                self.left_entity
            )));
        }
        let (left_anchor, position) = index.locate(self.left_entity).ok_or_else(|| {
            PlanForgeError::Structural(format!("entity {} is unassigned", self.left_entity))
        })?;
        let (right_anchor, split) = index.split_point(self.right_link).ok_or_else(|| {
            PlanForgeError::Structural(format!("link {:?} is not in any chain", self.right_link))
        })?;

        let mut chains = index.chains().to_vec();
        if left_anchor != right_anchor {
            let left_tail = chains[left_anchor].split_off(position);
            let right_tail = chains[right_anchor].split_off(split);
            chains[left_anchor].extend(right_tail);
            chains[right_anchor].extend(left_tail);
        } else if split > position {
            chains[left_anchor][position..split].reverse();
        } else if split < position {
            chains[left_anchor][split..position].reverse();
        }
        Ok(diff_links(index, &chains))
    }

    fn plan_for(&self, solution: &S) -> Result<LinkChanges> {
        self.plan(&ChainIndex::build(solution, &self.variable)?)
    }
}

impl<S: PlanningSolution> Move<S> for TailChainSwapMove<S> {
    type Undo = ChainRestoreMove<S>;

    fn is_doable<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> bool {
        self.plan_for(score_director.working_solution())
            .is_ok_and(|changes| !changes.is_empty())
    }

    fn do_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &mut D) {
        if let Ok(changes) = self.plan_for(score_director.working_solution()) {
            apply_links(&self.variable, &changes, score_director);
        }
    }

    fn undo_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> Self::Undo {
        let plan = self.plan_for(score_director.working_solution());
        snapshot(&self.variable, plan, score_director)
    }

    fn descriptor_index(&self) -> usize {
        self.variable.descriptor_index()
    }

    fn entity_indices(&self) -> &[usize] {
        std::slice::from_ref(&self.left_entity)
    }

    fn variable_name(&self) -> &str {
        self.variable.variable_name()
    }
}
