//! SubChainChangeMove - relocates a segment of a chain.
//!
//! The segment is cut out of its chain (the entity after it is reconnected
//! to the entity before it) and inserted after a new link, optionally
//! reversed.

use std::fmt::Debug;

use planforge_core::domain::{ChainIndex, ChainLink, ChainedVariable, PlanningSolution, SubChain};
use planforge_core::error::{PlanForgeError, Result};
use planforge_scoring::ScoreDirector;

use super::chain_restore::{apply_links, diff_links, snapshot, split_in, ChainRestoreMove, LinkChanges};
use super::Move;

/// A move that relocates a sub chain after another link.
///
/// # Example
///
/// ```
/// use planforge_core::domain::{ChainLink, SubChain};
/// use planforge_core::score::HardSoftScore;
/// use planforge_scoring::{ScoreDirector, SimpleScoreDirector};
/// use planforge_solver::heuristic::r#move::{Move, SubChainChangeMove};
/// use planforge_test::routing::{previous_variable, RoutingSolution};
///
/// // Vehicle 0: 0 -> 1 -> 2, vehicle 1: 3
/// let solution = RoutingSolution::from_chains(&[&[0, 1, 2], &[3]], 4);
/// let m = SubChainChangeMove::try_new(
///     &solution,
///     previous_variable(),
///     SubChain::new(vec![1, 2]),
///     ChainLink::Entity(3),
///     false,
/// )
/// .unwrap();
///
/// let mut director = SimpleScoreDirector::new(solution, |_: &RoutingSolution| HardSoftScore::ZERO);
/// m.do_move(&mut director);
/// assert_eq!(director.working_solution().chains(), vec![vec![0], vec![3, 1, 2]]);
/// ```
pub struct SubChainChangeMove<S> {
    variable: ChainedVariable<S>,
    sub_chain: SubChain,
    to_link: ChainLink,
    reversing: bool,
}

impl<S> Clone for SubChainChangeMove<S> {
    fn clone(&self) -> Self {
        Self {
            variable: self.variable,
            sub_chain: self.sub_chain.clone(),
            to_link: self.to_link,
            reversing: self.reversing,
        }
    }
}

impl<S> Debug for SubChainChangeMove<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubChainChangeMove")
            .field("sub_chain", &self.sub_chain.entities())
            .field("to_link", &self.to_link)
            .field("reversing", &self.reversing)
            .field("variable_name", &self.variable.variable_name())
            .finish()
    }
}

impl<S> SubChainChangeMove<S> {
    /// Creates the move after checking it against the solution's chains.
    ///
    /// # Errors
    ///
    /// Returns [`PlanForgeError::Structural`] when the chains are malformed,
    /// the sub chain is not a contiguous segment, or the target link lies
    /// inside the sub chain (which would create a cycle).
    pub fn try_new(
        solution: &S,
        variable: ChainedVariable<S>,
        sub_chain: SubChain,
        to_link: ChainLink,
        reversing: bool,
    ) -> Result<Self> {
        let mov = Self::new(variable, sub_chain, to_link, reversing);
        let index = ChainIndex::build(solution, &variable)?;
        mov.plan(&index)?;
        Ok(mov)
    }

    /// Creates the move from parts already known to be valid.
    pub(crate) fn new(
        variable: ChainedVariable<S>,
        sub_chain: SubChain,
        to_link: ChainLink,
        reversing: bool,
    ) -> Self {
        Self {
            variable,
            sub_chain,
            to_link,
            reversing,
        }
    }

    pub fn sub_chain(&self) -> &SubChain {
        &self.sub_chain
    }

    pub fn to_link(&self) -> ChainLink {
        self.to_link
    }

    pub fn is_reversing(&self) -> bool {
        self.reversing
    }

    fn plan(&self, index: &ChainIndex) -> Result<LinkChanges> {
        let (anchor, start) = index.locate_sub_chain(&self.sub_chain)?;
        if let ChainLink::Entity(target) = self.to_link {
            if self.sub_chain.contains(target) {
                return Err(PlanForgeError::Structural(format!(
                    "cannot move {:?} after its own entity {}",
                    self.sub_chain.entities(),
                    target
                )));
            }
        }

        let mut chains = index.chains().to_vec();
        let mut segment: Vec<usize> = chains[anchor]
            .drain(start..start + self.sub_chain.len())
            .collect();
        if self.reversing {
            segment.reverse();
        }
        let (target_anchor, split) = split_in(&chains, self.to_link)?;
        chains[target_anchor].splice(split..split, segment);
        Ok(diff_links(index, &chains))
    }

    fn plan_for(&self, solution: &S) -> Result<LinkChanges> {
        self.plan(&ChainIndex::build(solution, &self.variable)?)
    }
}

impl<S: PlanningSolution> Move<S> for SubChainChangeMove<S> {
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
        self.sub_chain.entities()
    }

    fn variable_name(&self) -> &str {
        self.variable.variable_name()
    }
}
