//! Storage - Store Adapter Trait and Implementations
//!
//! TigerStyle: One contract, one instance per backing store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      BlogStore Trait                         │
//! └─────────────────────────────────────────────────────────────┘
//!          ↑                              ↑
//!          │                              │
//! ┌────────┴────────┐           ┌────────┴────────┐
//! │    SimStore     │           │  PostgresStore  │
//! │ (sim / memory)  │           │  (production)   │
//! └─────────────────┘           └─────────────────┘
//! ```
//!
//! Either implementation can play store A or store B; the identifier scheme
//! it is built with decides which id space it lives in.

mod backend;
mod error;
mod sim;

#[cfg(feature = "postgres")]
mod postgres;

pub use backend::{BlogStore, Lookup};
pub use error::{StorageError, StorageResult};
pub use sim::{SimStore, SimStoreBuilder};

#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;
