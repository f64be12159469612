//! Runtime selector tree built from configuration.

use std::fmt::Debug;

use planforge_core::domain::PlanningSolution;
use planforge_scoring::ScoreDirector;

use crate::heuristic::r#move::GenericMove;

use super::decorator::{
    CartesianProductMoveSelector, SelectedCountLimitMoveSelector, UnionMoveSelector,
};
use super::factory::{MoveIteratorFactorySelector, MoveListFactorySelector};
use super::pillar::{PillarChangeMoveSelector, PillarSwapMoveSelector};
use super::sub_chain::{SubChainChangeMoveSelector, SubChainSwapMoveSelector};
use super::{
    ChangeMoveSelector, MoveSelector, SwapMoveSelector, TailChainSwapMoveSelector,
};

/// A node of a selector tree whose moves are all [`GenericMove`]s.
///
/// Leaves wrap a typed selector; composites own child nodes. Trees are
/// assembled by [`build_move_selector`](crate::builder::build_move_selector).
pub enum MoveSelectorNode<S, V> {
    Change(ChangeMoveSelector<S, V>),
    Swap(SwapMoveSelector<S, V>),
    PillarChange(PillarChangeMoveSelector<S, V>),
    PillarSwap(PillarSwapMoveSelector<S, V>),
    SubChainChange(SubChainChangeMoveSelector<S>),
    SubChainSwap(SubChainSwapMoveSelector<S>),
    TailChainSwap(TailChainSwapMoveSelector<S>),
    MoveList(MoveListFactorySelector<S, GenericMove<S, V>>),
    MoveIterator(MoveIteratorFactorySelector<S, GenericMove<S, V>>),
    Union(UnionMoveSelector<S, GenericMove<S, V>, MoveSelectorNode<S, V>>),
    CartesianProduct(CartesianProductMoveSelector<S, GenericMove<S, V>, MoveSelectorNode<S, V>>),
    CountLimit(Box<SelectedCountLimitMoveSelector<S, GenericMove<S, V>, MoveSelectorNode<S, V>>>),
}

impl<S, V> MoveSelectorNode<S, V> {
    /// Returns the config tag of this node's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Change(_) => "change",
            Self::Swap(_) => "swap",
            Self::PillarChange(_) => "pillar_change",
            Self::PillarSwap(_) => "pillar_swap",
            Self::SubChainChange(_) => "sub_chain_change",
            Self::SubChainSwap(_) => "sub_chain_swap",
            Self::TailChainSwap(_) => "tail_chain_swap",
            Self::MoveList(_) => "move_list_factory",
            Self::MoveIterator(_) => "move_iterator_factory",
            Self::Union(_) => "union",
            Self::CartesianProduct(_) => "cartesian_product",
            Self::CountLimit(limited) => limited.inner().kind(),
        }
    }

    /// Wraps this node in a selected count limit.
    pub fn limited(self, limit: usize) -> Self {
        Self::CountLimit(Box::new(SelectedCountLimitMoveSelector::new(self, limit)))
    }
}

impl<S, V> Debug for MoveSelectorNode<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Change(s) => s.fmt(f),
            Self::Swap(s) => s.fmt(f),
            Self::PillarChange(s) => s.fmt(f),
            Self::PillarSwap(s) => s.fmt(f),
            Self::SubChainChange(s) => s.fmt(f),
            Self::SubChainSwap(s) => s.fmt(f),
            Self::TailChainSwap(s) => s.fmt(f),
            Self::MoveList(s) => s.fmt(f),
            Self::MoveIterator(s) => s.fmt(f),
            Self::Union(s) => s.fmt(f),
            Self::CartesianProduct(s) => s.fmt(f),
            Self::CountLimit(s) => s.fmt(f),
        }
    }
}

impl<S, V> MoveSelector<S, GenericMove<S, V>> for MoveSelectorNode<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn iter_moves<'a, D: ScoreDirector<S> + ?Sized>(
        &'a self,
        score_director: &'a D,
    ) -> Box<dyn Iterator<Item = GenericMove<S, V>> + 'a> {
        match self {
            Self::Change(s) => Box::new(s.iter_moves(score_director).map(GenericMove::from)),
            Self::Swap(s) => s.iter_moves(score_director),
            Self::PillarChange(s) => Box::new(s.iter_moves(score_director).map(GenericMove::from)),
            Self::PillarSwap(s) => s.iter_moves(score_director),
            Self::SubChainChange(s) => {
                Box::new(s.iter_moves(score_director).map(GenericMove::from))
            }
            Self::SubChainSwap(s) => Box::new(s.iter_moves(score_director).map(GenericMove::from)),
            Self::TailChainSwap(s) => {
                Box::new(s.iter_moves(score_director).map(GenericMove::from))
            }
            Self::MoveList(s) => s.iter_moves(score_director),
            Self::MoveIterator(s) => s.iter_moves(score_director),
            Self::Union(s) => s.iter_moves(score_director),
            Self::CartesianProduct(s) => {
                Box::new(s.iter_moves(score_director).map(GenericMove::from))
            }
            Self::CountLimit(s) => s.iter_moves(score_director),
        }
    }

    fn size<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> usize {
        match self {
            Self::Change(s) => s.size(score_director),
            Self::Swap(s) => s.size(score_director),
            Self::PillarChange(s) => s.size(score_director),
            Self::PillarSwap(s) => s.size(score_director),
            Self::SubChainChange(s) => s.size(score_director),
            Self::SubChainSwap(s) => s.size(score_director),
            Self::TailChainSwap(s) => s.size(score_director),
            Self::MoveList(s) => s.size(score_director),
            Self::MoveIterator(s) => s.size(score_director),
            Self::Union(s) => s.size(score_director),
            Self::CartesianProduct(s) => s.size(score_director),
            Self::CountLimit(s) => s.size(score_director),
        }
    }

    fn is_never_ending(&self) -> bool {
        match self {
            Self::Change(s) => s.is_never_ending(),
            Self::Swap(s) => s.is_never_ending(),
            Self::PillarChange(s) => s.is_never_ending(),
            Self::PillarSwap(s) => s.is_never_ending(),
            Self::SubChainChange(s) => s.is_never_ending(),
            Self::SubChainSwap(s) => s.is_never_ending(),
            Self::TailChainSwap(s) => s.is_never_ending(),
            Self::MoveList(s) => s.is_never_ending(),
            Self::MoveIterator(s) => s.is_never_ending(),
            Self::Union(s) => s.is_never_ending(),
            Self::CartesianProduct(s) => s.is_never_ending(),
            Self::CountLimit(s) => s.is_never_ending(),
        }
    }
}
