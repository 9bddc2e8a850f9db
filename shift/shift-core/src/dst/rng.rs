//! DeterministicRng - Seeded randomness
//!
//! TigerStyle: Same seed, same sequence. Seeds are logged by the caller.

use std::sync::{Arc, Mutex};

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shared, seeded random number generator.
///
/// Clones draw from the same stream.
#[derive(Debug, Clone)]
pub struct DeterministicRng {
    seed: u64,
    inner: Arc<Mutex<ChaCha8Rng>>,
}

impl DeterministicRng {
    /// Create a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))),
        }
    }

    /// The seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next value in `[0.0, 1.0)`.
    pub fn next_f64(&self) -> f64 {
        self.with(|rng| rng.gen::<f64>())
    }

    /// Fill `dest` with random bytes.
    pub fn fill_bytes(&self, dest: &mut [u8]) {
        self.with(|rng| rng.fill_bytes(dest));
    }

    fn with<T>(&self, f: impl FnOnce(&mut ChaCha8Rng) -> T) -> T {
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }
}
