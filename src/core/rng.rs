//! Seeded randomness for generation, shuffles and prop spawns.
//!
//! One `GameRng` is owned by each game and threaded through every random
//! decision, so a seed fixes the board, every shuffle and every spawn.
//!
//! ```
//! use pairlink::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.below(100), b.below(100));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backed by ChaCha8, reproducible across platforms.
#[derive(Clone, Debug)]
pub struct GameRng(ChaCha8Rng);

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// A uniform index in `0..len`. `len` must be non-zero.
    pub fn below(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    /// A uniform copy of one element, or `None` for an empty slice.
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        items.choose(&mut self.0).copied()
    }

    /// Permute `items` in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }
}
