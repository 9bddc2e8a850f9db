//! Fault Injection
//!
//! TigerStyle: Failures are explicit, configured up front, and reproducible
//! from the seed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::rng::DeterministicRng;

// =============================================================================
// Fault Types
// =============================================================================

/// Store operation class a fault applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultType {
    /// Create operations fail with a write error.
    WriteFail,
    /// Lookups and listings fail with a read error.
    ReadFail,
    /// Schema setup fails.
    SchemaFail,
}

/// When a configured fault fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaultTrigger {
    /// Every matching operation fails.
    Always,
    /// The first `n` matching operations succeed, all later ones fail.
    AfterOps(u64),
    /// Each matching operation fails with this probability.
    Probability(f64),
}

/// A single fault rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultConfig {
    /// Operation class
    pub fault_type: FaultType,
    /// Firing rule
    pub trigger: FaultTrigger,
}

impl FaultConfig {
    /// Fault firing with the given probability.
    ///
    /// # Panics
    /// Panics if probability is outside `[0.0, 1.0]`.
    #[must_use]
    pub fn new(fault_type: FaultType, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "probability {probability} must be in [0, 1]"
        );
        Self {
            fault_type,
            trigger: FaultTrigger::Probability(probability),
        }
    }

    /// Fault firing on every matching operation.
    #[must_use]
    pub fn always(fault_type: FaultType) -> Self {
        Self {
            fault_type,
            trigger: FaultTrigger::Always,
        }
    }

    /// Fault firing once `ops` matching operations have succeeded.
    #[must_use]
    pub fn after(fault_type: FaultType, ops: u64) -> Self {
        Self {
            fault_type,
            trigger: FaultTrigger::AfterOps(ops),
        }
    }
}

// =============================================================================
// Fault Injector
// =============================================================================

#[derive(Debug)]
struct FaultRule {
    config: FaultConfig,
    seen: AtomicU64,
}

/// Decides, per operation, whether a configured fault fires.
#[derive(Debug, Clone)]
pub struct FaultInjector {
    rules: Arc<Vec<FaultRule>>,
    rng: DeterministicRng,
}

impl FaultInjector {
    /// Start building an injector seeded from `rng`.
    #[must_use]
    pub fn builder(rng: DeterministicRng) -> FaultInjectorBuilder {
        FaultInjectorBuilder {
            rng,
            configs: Vec::new(),
        }
    }

    /// Returns true if an operation of `fault_type` should fail now.
    pub fn should_fail(&self, fault_type: FaultType) -> bool {
        let mut fire = false;
        for rule in self.rules.iter() {
            if rule.config.fault_type != fault_type {
                continue;
            }
            let seen = rule.seen.fetch_add(1, Ordering::SeqCst);
            fire |= match rule.config.trigger {
                FaultTrigger::Always => true,
                FaultTrigger::AfterOps(n) => seen >= n,
                FaultTrigger::Probability(p) => self.rng.next_f64() < p,
            };
        }
        if fire {
            tracing::debug!(?fault_type, seed = self.rng.seed(), "injected fault");
        }
        fire
    }
}

/// Builder for [`FaultInjector`].
#[derive(Debug)]
pub struct FaultInjectorBuilder {
    rng: DeterministicRng,
    configs: Vec<FaultConfig>,
}

impl FaultInjectorBuilder {
    /// Add a fault rule.
    #[must_use]
    pub fn with_fault(mut self, config: FaultConfig) -> Self {
        self.configs.push(config);
        self
    }

    /// Build the injector.
    #[must_use]
    pub fn build(self) -> FaultInjector {
        let rules = self
            .configs
            .into_iter()
            .map(|config| FaultRule {
                config,
                seen: AtomicU64::new(0),
            })
            .collect();
        FaultInjector {
            rules: Arc::new(rules),
            rng: self.rng,
        }
    }
}
