//! Seeded random generators for random-order selectors.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Hands out a fresh [`StdRng`] for every pass of a random selector.
///
/// The n-th pass is seeded from `seed` and `n`, so two selectors built
/// with the same seed produce the same sequence of passes.
#[derive(Debug)]
pub struct SelectorRng {
    seed: u64,
    restarts: AtomicU64,
}

impl SelectorRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            restarts: AtomicU64::new(0),
        }
    }

    /// Creates a generator seeded from the operating system.
    pub fn from_os() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the generator for the next pass.
    pub fn restart(&self) -> StdRng {
        let pass = self.restarts.fetch_add(1, Ordering::Relaxed);
        StdRng::seed_from_u64(derive_seed(self.seed, pass))
    }

    /// Derives the seed of the n-th child of a selector.
    pub fn child_seed(&self, child: u64) -> u64 {
        derive_seed(self.seed, child.wrapping_add(1) << 32)
    }
}

impl Clone for SelectorRng {
    fn clone(&self) -> Self {
        Self::new(self.seed)
    }
}

impl Default for SelectorRng {
    fn default() -> Self {
        Self::new(0)
    }
}

fn derive_seed(seed: u64, n: u64) -> u64 {
    seed.wrapping_add(n.wrapping_mul(SEED_STRIDE))
}
