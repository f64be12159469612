//! GenericMove - the move type produced by config-built selector trees.
//!
//! A selector tree mixes move kinds; this enum gives them one concrete type
//! without boxing.

use std::fmt::Debug;

use planforge_core::domain::PlanningSolution;
use planforge_scoring::ScoreDirector;

use super::{
    ChainRestoreMove, ChangeMove, CompositeMove, Move, PillarChangeMove, PillarSwapMove,
    SubChainChangeMove, SubChainSwapMove, SwapMove, TailChainSwapMove,
};

/// Any move a selector tree can produce for a solution `S` whose basic
/// variables take values of type `V`.
pub enum GenericMove<S, V> {
    Change(ChangeMove<S, V>),
    Swap(SwapMove<S, V>),
    PillarChange(PillarChangeMove<S, V>),
    PillarSwap(PillarSwapMove<S, V>),
    SubChainChange(SubChainChangeMove<S>),
    SubChainSwap(SubChainSwapMove<S>),
    TailChainSwap(TailChainSwapMove<S>),
    ChainRestore(ChainRestoreMove<S>),
    Composite(CompositeMove<S, GenericMove<S, V>>),
}

impl<S, V: Clone> Clone for GenericMove<S, V> {
    fn clone(&self) -> Self {
        match self {
            Self::Change(m) => Self::Change(m.clone()),
            Self::Swap(m) => Self::Swap(*m),
            Self::PillarChange(m) => Self::PillarChange(m.clone()),
            Self::PillarSwap(m) => Self::PillarSwap(m.clone()),
            Self::SubChainChange(m) => Self::SubChainChange(m.clone()),
            Self::SubChainSwap(m) => Self::SubChainSwap(m.clone()),
            Self::TailChainSwap(m) => Self::TailChainSwap(*m),
            Self::ChainRestore(m) => Self::ChainRestore(m.clone()),
            Self::Composite(m) => Self::Composite(m.clone()),
        }
    }
}

impl<S, V: Debug> Debug for GenericMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Change(m) => m.fmt(f),
            Self::Swap(m) => m.fmt(f),
            Self::PillarChange(m) => m.fmt(f),
            Self::PillarSwap(m) => m.fmt(f),
            Self::SubChainChange(m) => m.fmt(f),
            Self::SubChainSwap(m) => m.fmt(f),
            Self::TailChainSwap(m) => m.fmt(f),
            Self::ChainRestore(m) => m.fmt(f),
            Self::Composite(m) => m.fmt(f),
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $m:ident => $body:expr) => {
        match $self {
            GenericMove::Change($m) => $body,
            GenericMove::Swap($m) => $body,
            GenericMove::PillarChange($m) => $body,
            GenericMove::PillarSwap($m) => $body,
            GenericMove::SubChainChange($m) => $body,
            GenericMove::SubChainSwap($m) => $body,
            GenericMove::TailChainSwap($m) => $body,
            GenericMove::ChainRestore($m) => $body,
            GenericMove::Composite($m) => $body,
        }
    };
}

impl<S, V> Move<S> for GenericMove<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    type Undo = GenericMove<S, V>;

    fn is_doable<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> bool {
        dispatch!(self, m => m.is_doable(score_director))
    }

    fn do_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &mut D) {
        dispatch!(self, m => m.do_move(score_director))
    }

    fn undo_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> Self::Undo {
        match self {
            Self::Change(m) => Self::Change(m.undo_move(score_director)),
            Self::Swap(m) => Self::Swap(m.undo_move(score_director)),
            Self::PillarChange(m) => Self::PillarChange(m.undo_move(score_director)),
            Self::PillarSwap(m) => Self::PillarSwap(m.undo_move(score_director)),
            Self::SubChainChange(m) => Self::ChainRestore(m.undo_move(score_director)),
            Self::SubChainSwap(m) => Self::ChainRestore(m.undo_move(score_director)),
            Self::TailChainSwap(m) => Self::ChainRestore(m.undo_move(score_director)),
            Self::ChainRestore(m) => Self::ChainRestore(m.undo_move(score_director)),
            Self::Composite(m) => Self::Composite(m.undo_move(score_director)),
        }
    }

    fn descriptor_index(&self) -> usize {
        dispatch!(self, m => m.descriptor_index())
    }

    fn entity_indices(&self) -> &[usize] {
        dispatch!(self, m => m.entity_indices())
    }

    fn variable_name(&self) -> &str {
        dispatch!(self, m => m.variable_name())
    }
}

impl<S, V> From<ChangeMove<S, V>> for GenericMove<S, V> {
    fn from(m: ChangeMove<S, V>) -> Self {
        Self::Change(m)
    }
}

impl<S, V> From<SwapMove<S, V>> for GenericMove<S, V> {
    fn from(m: SwapMove<S, V>) -> Self {
        Self::Swap(m)
    }
}

impl<S, V> From<PillarChangeMove<S, V>> for GenericMove<S, V> {
    fn from(m: PillarChangeMove<S, V>) -> Self {
        Self::PillarChange(m)
    }
}

impl<S, V> From<PillarSwapMove<S, V>> for GenericMove<S, V> {
    fn from(m: PillarSwapMove<S, V>) -> Self {
        Self::PillarSwap(m)
    }
}

impl<S, V> From<SubChainChangeMove<S>> for GenericMove<S, V> {
    fn from(m: SubChainChangeMove<S>) -> Self {
        Self::SubChainChange(m)
    }
}

impl<S, V> From<SubChainSwapMove<S>> for GenericMove<S, V> {
    fn from(m: SubChainSwapMove<S>) -> Self {
        Self::SubChainSwap(m)
    }
}

impl<S, V> From<TailChainSwapMove<S>> for GenericMove<S, V> {
    fn from(m: TailChainSwapMove<S>) -> Self {
        Self::TailChainSwap(m)
    }
}

impl<S, V> From<CompositeMove<S, GenericMove<S, V>>> for GenericMove<S, V> {
    fn from(m: CompositeMove<S, GenericMove<S, V>>) -> Self {
        Self::Composite(m)
    }
}
