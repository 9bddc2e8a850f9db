//! SimConfig - Simulation seed and shared handles

use crate::constants::DST_SEED_ENV;

use super::clock::SimClock;
use super::fault::{FaultInjector, FaultInjectorBuilder};
use super::rng::DeterministicRng;

/// Seed plus the clock and RNG derived from it.
#[derive(Debug, Clone)]
pub struct SimConfig {
    seed: u64,
    clock: SimClock,
    rng: DeterministicRng,
}

impl SimConfig {
    /// Config with an explicit seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            clock: SimClock::new(),
            rng: DeterministicRng::new(seed),
        }
    }

    /// Seed from `DST_SEED`, or a fresh random seed. The seed is logged.
    #[must_use]
    pub fn from_env() -> Self {
        let seed = std::env::var(DST_SEED_ENV)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(rand::random);
        tracing::info!(seed, "DST seed (rerun with {}={})", DST_SEED_ENV, seed);
        Self::with_seed(seed)
    }

    /// The seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shared clock handle.
    #[must_use]
    pub fn clock(&self) -> SimClock {
        self.clock.clone()
    }

    /// Shared RNG handle.
    #[must_use]
    pub fn rng(&self) -> DeterministicRng {
        self.rng.clone()
    }

    /// Fault injector builder drawing from this config's RNG.
    #[must_use]
    pub fn fault_injector(&self) -> FaultInjectorBuilder {
        FaultInjector::builder(self.rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_seed_is_reproducible() {
        let a = SimConfig::with_seed(5);
        let b = SimConfig::with_seed(5);

        assert_eq!(a.seed(), 5);
        assert_eq!(a.rng().next_f64().to_bits(), b.rng().next_f64().to_bits());
    }

    #[test]
    fn test_clock_handle_is_shared() {
        let config = SimConfig::with_seed(1);
        config.clock().advance_ms(10);
        assert_eq!(config.clock().now_ms(), 10);
    }
}
