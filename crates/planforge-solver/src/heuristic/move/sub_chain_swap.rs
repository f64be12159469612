//! SubChainSwapMove - exchanges two segments of chains.

use std::fmt::Debug;

use planforge_core::domain::{ChainIndex, ChainedVariable, PlanningSolution, SubChain};
use planforge_core::error::{PlanForgeError, Result};
use planforge_scoring::ScoreDirector;

use super::chain_restore::{apply_links, diff_links, snapshot, ChainRestoreMove, LinkChanges};
use super::Move;

/// A move that swaps two non-overlapping sub chains, optionally reversing both.
///
/// The sub chains may belong to the same chain.
pub struct SubChainSwapMove<S> {
    variable: ChainedVariable<S>,
    left: SubChain,
    right: SubChain,
    reversing: bool,
    entities: Vec<usize>,
}

impl<S> Clone for SubChainSwapMove<S> {
    fn clone(&self) -> Self {
        Self {
            variable: self.variable,
            left: self.left.clone(),
            right: self.right.clone(),
            reversing: self.reversing,
            entities: self.entities.clone(),
        }
    }
}

impl<S> Debug for SubChainSwapMove<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubChainSwapMove")
            .field("left", &self.left.entities())
            .field("right", &self.right.entities())
            .field("reversing", &self.reversing)
            .field("variable_name", &self.variable.variable_name())
            .finish()
    }
}

impl<S> SubChainSwapMove<S> {
    /// Creates the move after checking it against the solution's chains.
    ///
    /// # Errors
    ///
    /// Returns [`PlanForgeError::Structural`] when the chains are malformed,
    /// either sub chain is not a contiguous segment, or they overlap.
    pub fn try_new(
        solution: &S,
        variable: ChainedVariable<S>,
        left: SubChain,
        right: SubChain,
        reversing: bool,
    ) -> Result<Self> {
        let mov = Self::new(variable, left, right, reversing);
        let index = ChainIndex::build(solution, &variable)?;
        mov.plan(&index)?;
        Ok(mov)
    }

    /// Creates the move from parts already known to be valid.
    pub(crate) fn new(
        variable: ChainedVariable<S>,
        left: SubChain,
        right: SubChain,
        reversing: bool,
    ) -> Self {
        let entities = left
            .entities()
            .iter()
            .chain(right.entities())
            .copied()
            .collect();
        Self {
            variable,
            left,
            right,
            reversing,
            entities,
        }
    }

    pub fn left(&self) -> &SubChain {
        &self.left
    }

    pub fn right(&self) -> &SubChain {
        &self.right
    }

    pub fn is_reversing(&self) -> bool {
        self.reversing
    }

    fn plan(&self, index: &ChainIndex) -> Result<LinkChanges> {
        let (left_anchor, left_start) = index.locate_sub_chain(&self.left)?;
        let (right_anchor, right_start) = index.locate_sub_chain(&self.right)?;
        if self.left.overlaps(&self.right) {
            return Err(PlanForgeError::Structural(format!(
                "sub chains {:?} and {:?} overlap",
                self.left.entities(),
                self.right.entities()
            )));
        }

        let mut left_segment = self.left.entities().to_vec();
        let mut right_segment = self.right.entities().to_vec();
        if self.reversing {
            left_segment.reverse();
            right_segment.reverse();
        }

        let mut chains = index.chains().to_vec();
        let left_range = left_start..left_start + self.left.len();
        let right_range = right_start..right_start + self.right.len();
        if left_anchor != right_anchor || left_start > right_start {
            // Splice the later segment first so the earlier range stays valid.
            chains[left_anchor].splice(left_range, right_segment);
            chains[right_anchor].splice(right_range, left_segment);
        } else {
            chains[right_anchor].splice(right_range, left_segment);
            chains[left_anchor].splice(left_range, right_segment);
        }
        Ok(diff_links(index, &chains))
    }

    fn plan_for(&self, solution: &S) -> Result<LinkChanges> {
        self.plan(&ChainIndex::build(solution, &self.variable)?)
    }
}

impl<S: PlanningSolution> Move<S> for SubChainSwapMove<S> {
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
        &self.entities
    }

    fn variable_name(&self) -> &str {
        self.variable.variable_name()
    }
}
