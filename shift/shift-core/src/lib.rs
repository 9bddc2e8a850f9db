//! Shift Core - Online Store Migration with DST
//!
//! TigerStyle data-access layer that moves a blog's users, posts and comments
//! from one store to another without a single cutover instant.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      Router                              │
//! │  dual-write │ read fallback │ feed/post composition      │
//! ├─────────────────────────────────────────────────────────┤
//! │  Strategy (mode → read-A, read-B, write-A, write-B)      │
//! ├───────────────────────────┬─────────────────────────────┤
//! │  Store A (BlogStore)      │  Store B (BlogStore)         │
//! │  ObjectId identifiers     │  UUID identifiers            │
//! └───────────────────────────┴─────────────────────────────┘
//!            ↑                              ↑
//!            └──────── BulkMigration ───────┘
//!                 (copy A → B, remap ids)
//! ```
//!
//! The migration is advanced by the operator, one mode at a time:
//! `source_only` → `double_write` → (bulk copy) → `read_migration` →
//! `destination_only`.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use shift_core::{IdScheme, MigrationMode, Router, SimStore, Strategy};
//!
//! # tokio_test_block(async {
//! let source = Arc::new(SimStore::new("source", IdScheme::ObjectId));
//! let destination = Arc::new(SimStore::new("destination", IdScheme::Uuid));
//! let router = Router::new(
//!     source,
//!     destination,
//!     Strategy::resolve(MigrationMode::DoubleWrite, false),
//! );
//!
//! let user = router.create_user("Ada", "ada@example.com").await.unwrap();
//! assert!(router.get_user(&user.id).await.unwrap().is_some());
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod dst;
pub mod id;
pub mod migration;
pub mod model;
pub mod router;
pub mod storage;
pub mod strategy;

// Re-export common types
pub use constants::*;
pub use dst::{DeterministicRng, FaultConfig, FaultInjector, FaultType, SimClock, SimConfig};
pub use id::IdScheme;
pub use migration::{BulkMigration, IdRemap, MigrationReport};
pub use model::{Comment, CommentView, FeedPost, Post, PostWithComments, SortMode, User};
pub use router::{Routed, Router, StoreSide};
pub use storage::{BlogStore, Lookup, SimStore, StorageError, StorageResult};
pub use strategy::{ConfigError, MigrationMode, Strategy};

#[cfg(feature = "postgres")]
pub use storage::PostgresStore;
