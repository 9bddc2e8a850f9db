//! DST - Deterministic Simulation Testing
//!
//! Seeded clock, randomness and fault injection for the in-memory stores.
//!
//! # Usage
//!
//! ```rust
//! use shift_core::dst::{FaultConfig, FaultType, SimConfig};
//! use shift_core::{IdScheme, SimStore};
//!
//! let config = SimConfig::with_seed(42);
//! let store = SimStore::builder("destination", IdScheme::Uuid)
//!     .with_clock(config.clock())
//!     .with_faults(
//!         config
//!             .fault_injector()
//!             .with_fault(FaultConfig::new(FaultType::WriteFail, 0.1))
//!             .build(),
//!     )
//!     .build();
//! # let _ = store;
//! ```
//!
//! Run with explicit seed for reproducibility:
//! ```bash
//! DST_SEED=12345 cargo test
//! ```

mod clock;
mod config;
mod fault;
mod rng;

pub use clock::SimClock;
pub use config::SimConfig;
pub use fault::{FaultConfig, FaultInjector, FaultInjectorBuilder, FaultTrigger, FaultType};
pub use rng::DeterministicRng;
