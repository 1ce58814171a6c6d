//! Deterministic random number generation for dealing.
//!
//! The only randomness in Casino is the initial shuffle. `GameRng` wraps a
//! seeded ChaCha8 stream so a game can be replayed exactly from its seed.
//! `GameState` keeps only the seed.
//!
//! ```
//! use casino_engine::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//!
//! let mut xs = vec![1, 2, 3, 4, 5];
//! let mut ys = xs.clone();
//! a.shuffle(&mut xs);
//! b.shuffle(&mut ys);
//! assert_eq!(xs, ys);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded RNG used by the dealer.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the thread-local entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(seed: u64) -> Vec<u32> {
        let mut data: Vec<u32> = (1..=40).collect();
        GameRng::new(seed).shuffle(&mut data);
        data
    }

    #[test]
    fn test_determinism() {
        assert_eq!(shuffled(42), shuffled(42));
        assert_eq!(GameRng::new(42).seed(), 42);
    }

    #[test]
    fn test_different_seeds() {
        assert_ne!(shuffled(1), shuffled(2));
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (1..=40).collect();
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_ne!(data, original);
        data.sort_unstable();
        assert_eq!(data, original);
    }
}
