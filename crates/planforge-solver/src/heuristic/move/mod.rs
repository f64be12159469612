//! Move system for modifying planning solutions.
//!
//! Moves are the fundamental operations that modify planning variables.
//! A local search explores the solution space by applying moves and
//! evaluating their impact on the score.
//!
//! # Architecture
//!
//! All moves are fully typed with inline value storage:
//! - `ChangeMove<S, V>` - assigns a value to a variable
//! - `SwapMove<S, V>` - swaps values between two entities
//! - `PillarChangeMove<S, V>` - changes every entity of a pillar
//! - `PillarSwapMove<S, V>` - swaps the values of two pillars
//! - `SubChainChangeMove<S>` - relocates a segment of a chain
//! - `SubChainSwapMove<S>` - swaps two chain segments
//! - `TailChainSwapMove<S>` - swaps two chain tails (2-opt in one chain)
//! - `ChainRestoreMove<S>` - restores a snapshot of chain links
//! - `CompositeMove<S, M>` - applies several moves as one step
//! - `GenericMove<S, V>` - any of the above, as produced by built selector trees
//!
//! Every move can build its inverse with [`Move::undo_move`]. Moves also
//! register undo closures, so `RecordingScoreDirector` can roll back a
//! trial move without building the inverse.

mod chain_restore;
mod change;
mod composite;
mod generic;
mod pillar_change;
mod pillar_swap;
mod sub_chain_change;
mod sub_chain_swap;
mod swap;
mod tail_chain_swap;
mod traits;

#[cfg(test)]
mod tests;

pub use chain_restore::{ChainRestoreMove, LinkChanges};
pub use change::ChangeMove;
pub use composite::CompositeMove;
pub use generic::GenericMove;
pub use pillar_change::{PillarChangeMove, PillarIndices};
pub use pillar_swap::PillarSwapMove;
pub use sub_chain_change::SubChainChangeMove;
pub use sub_chain_swap::SubChainSwapMove;
pub use swap::SwapMove;
pub use tail_chain_swap::TailChainSwapMove;
pub use traits::Move;
