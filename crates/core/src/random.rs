//! Injectable randomness.
//!
//! Every random choice the skill makes (phrase variants, greeting language,
//! voice, upsell coin flip) goes through a [`RandomSource`] so tests can pin
//! outcomes.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform choices.
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..len`. Returns `0` when `len` is zero.
    fn index(&self, len: usize) -> usize;

    /// Fair coin; `true` is heads.
    fn coin_flip(&self) -> bool {
        self.index(2) == 0
    }
}

/// Pick one element uniformly, `None` for an empty slice.
pub fn choose<'a, T>(random: &dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(random.index(items.len()))
}

/// Process RNG (`rand::thread_rng`).
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible RNG seeded once.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..len)
    }
}

/// Always returns the same index (clamped to the slice) and coin side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRandom {
    index: usize,
    heads: bool,
}

impl FixedRandom {
    pub fn new(index: usize, heads: bool) -> Self {
        Self { index, heads }
    }

    /// First element of every list, coin lands heads.
    pub fn first_heads() -> Self {
        Self::new(0, true)
    }

    /// First element of every list, coin lands tails.
    pub fn first_tails() -> Self {
        Self::new(0, false)
    }
}

impl RandomSource for FixedRandom {
    fn index(&self, len: usize) -> usize {
        self.index.min(len.saturating_sub(1))
    }

    fn coin_flip(&self) -> bool {
        self.heads
    }
}
