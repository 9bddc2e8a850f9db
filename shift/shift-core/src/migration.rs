//! Bulk Migration - One-shot copy from source to destination
//!
//! TigerStyle: Single-threaded, sequential, no hidden retries.
//!
//! Flow:
//! 1. Ensure the destination schema exists (fatal on failure)
//! 2. Copy users, recording source id → destination id
//! 3. Copy posts, remapping `user_id`, recording source id → destination id
//! 4. Copy comments, remapping `post_id` and `user_id`
//!
//! A reference with no mapping is copied verbatim and counted in the report.
//! The job keeps its remap tables in memory only: it is not resumable and
//! not idempotent. A second run duplicates everything; truncate the
//! destination before retrying a failed run.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::{BlogStore, StorageResult};

// =============================================================================
// Identifier Remap
// =============================================================================

/// Source identifier → destination identifier for one entity kind.
#[derive(Debug, Default, Clone)]
pub struct IdRemap {
    map: HashMap<String, String>,
    misses: u64,
}

impl IdRemap {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `source_id` was copied as `destination_id`.
    pub fn insert(&mut self, source_id: String, destination_id: String) {
        self.map.insert(source_id, destination_id);
    }

    /// Destination id for `source_id`, if it was copied.
    #[must_use]
    pub fn get(&self, source_id: &str) -> Option<&str> {
        self.map.get(source_id).map(String::as_str)
    }

    /// Destination id for `source_id`, or `source_id` itself when unmapped.
    /// Every fallback is counted.
    pub fn resolve(&mut self, source_id: &str) -> String {
        if let Some(mapped) = self.get(source_id) {
            return mapped.to_string();
        }
        self.misses += 1;
        source_id.to_string()
    }

    /// Number of mapped identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when nothing has been mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of `resolve` calls that fell back to the raw id.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

// =============================================================================
// Report
// =============================================================================

/// Counts produced by a bulk migration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    /// Users copied
    pub users: u64,
    /// Posts copied
    pub posts: u64,
    /// Comments copied
    pub comments: u64,
    /// User references copied verbatim for lack of a mapping
    pub unmapped_user_refs: u64,
    /// Post references copied verbatim for lack of a mapping
    pub unmapped_post_refs: u64,
}

impl std::fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Migrated {} users", self.users)?;
        writeln!(f, "Migrated {} posts", self.posts)?;
        write!(f, "Migrated {} comments", self.comments)
    }
}

// =============================================================================
// Bulk Migration
// =============================================================================

/// Copies every user, post and comment from `source` into `destination`.
pub struct BulkMigration {
    source: Arc<dyn BlogStore>,
    destination: Arc<dyn BlogStore>,
}

impl BulkMigration {
    /// Prepare a copy from `source` to `destination`.
    #[must_use]
    pub fn new(source: Arc<dyn BlogStore>, destination: Arc<dyn BlogStore>) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Run the copy.
    ///
    /// # Errors
    /// Schema setup failure aborts before anything is copied. Any later
    /// failure aborts the run and leaves the destination partially filled.
    pub async fn run(&self) -> StorageResult<MigrationReport> {
        let source = self.source.as_ref();
        let destination = self.destination.as_ref();
        tracing::info!(
            source = source.name(),
            destination = destination.name(),
            "bulk migration starting"
        );

        if let Err(e) = destination.ensure_schema().await {
            tracing::error!(error = %e, "destination schema setup failed; aborting");
            return Err(e);
        }

        let mut report = MigrationReport::default();
        let mut users = IdRemap::new();
        let mut posts = IdRemap::new();

        // Users
        for user in source.list_users().await? {
            let copy = destination.create_user(&user.name, &user.email).await?;
            users.insert(user.id, copy.id);
            report.users += 1;
        }
        tracing::info!(count = report.users, "Migrated {} users", report.users);

        // Posts
        for post in source.list_posts().await? {
            let user_id = remap(&mut users, &post.user_id, "post.user_id");
            let copy = destination
                .create_post(&user_id, &post.title, &post.content)
                .await?;
            posts.insert(post.id, copy.id);
            report.posts += 1;
        }
        tracing::info!(count = report.posts, "Migrated {} posts", report.posts);

        // Comments
        for comment in source.list_comments().await? {
            let post_id = remap(&mut posts, &comment.post_id, "comment.post_id");
            let user_id = remap(&mut users, &comment.user_id, "comment.user_id");
            destination
                .create_comment(&post_id, &user_id, &comment.content)
                .await?;
            report.comments += 1;
        }
        tracing::info!(count = report.comments, "Migrated {} comments", report.comments);

        report.unmapped_user_refs = users.misses();
        report.unmapped_post_refs = posts.misses();

        // Postconditions
        assert_eq!(
            u64::try_from(users.len()).unwrap_or(u64::MAX),
            report.users,
            "every copied user must be mapped"
        );
        assert_eq!(
            u64::try_from(posts.len()).unwrap_or(u64::MAX),
            report.posts,
            "every copied post must be mapped"
        );

        tracing::info!(?report, "bulk migration done");
        Ok(report)
    }
}

fn remap(table: &mut IdRemap, raw: &str, field: &'static str) -> String {
    let misses = table.misses();
    let resolved = table.resolve(raw);
    if table.misses() > misses {
        tracing::warn!(field, id = raw, "no mapping; copying identifier verbatim");
    }
    resolved
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dst::{FaultConfig, FaultType, SimConfig};
    use crate::id::IdScheme;
    use crate::storage::{SimStore, StorageError};

    fn stores() -> (Arc<SimStore>, Arc<SimStore>) {
        (
            Arc::new(SimStore::new("source", IdScheme::ObjectId)),
            Arc::new(SimStore::new("destination", IdScheme::Uuid)),
        )
    }

    #[test]
    fn test_id_remap_resolve_and_misses() {
        let mut remap = IdRemap::new();
        remap.insert("a".to_string(), "A".to_string());

        assert_eq!(remap.resolve("a"), "A");
        assert_eq!(remap.resolve("b"), "b");
        assert_eq!(remap.get("a"), Some("A"));
        assert_eq!(remap.len(), 1);
        assert_eq!(remap.misses(), 1);
    }

    #[test]
    fn test_report_display() {
        let report = MigrationReport {
            users: 2,
            posts: 3,
            comments: 1,
            ..MigrationReport::default()
        };
        assert_eq!(
            report.to_string(),
            "Migrated 2 users\nMigrated 3 posts\nMigrated 1 comments"
        );
    }

    #[tokio::test]
    async fn test_empty_source() {
        let (source, destination) = stores();
        let report = BulkMigration::new(source, destination).run().await.unwrap();
        assert_eq!(report, MigrationReport::default());
    }

    #[tokio::test]
    async fn test_remaps_foreign_keys() {
        let (source, destination) = stores();
        let alice = source.create_user("Alice", "a@example.com").await.unwrap();
        let post = source.create_post(&alice.id, "T", "C").await.unwrap();
        source.create_comment(&post.id, &alice.id, "hi").await.unwrap();

        let report = BulkMigration::new(source.clone(), destination.clone())
            .run()
            .await
            .unwrap();

        assert_eq!((report.users, report.posts, report.comments), (1, 1, 1));
        assert_eq!(report.unmapped_user_refs, 0);
        assert_eq!(report.unmapped_post_refs, 0);

        let new_alice = &destination.list_users().await.unwrap()[0];
        let new_post = &destination.list_posts().await.unwrap()[0];
        let new_comment = &destination.list_comments().await.unwrap()[0];
        assert_ne!(new_alice.id, alice.id);
        assert_eq!(new_post.user_id, new_alice.id);
        assert_eq!(new_comment.post_id, new_post.id);
        assert_eq!(new_comment.user_id, new_alice.id);
    }

    #[tokio::test]
    async fn test_dangling_reference_copied_verbatim() {
        let (source, destination) = stores();
        source.create_post("missing-user", "T", "C").await.unwrap();
        source.create_comment("missing-post", "missing-user", "x").await.unwrap();

        let report = BulkMigration::new(source, destination.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(report.unmapped_user_refs, 2);
        assert_eq!(report.unmapped_post_refs, 1);
        assert_eq!(destination.list_posts().await.unwrap()[0].user_id, "missing-user");
        assert_eq!(destination.list_comments().await.unwrap()[0].post_id, "missing-post");
    }

    #[tokio::test]
    async fn test_schema_failure_aborts_before_copy() {
        let source = Arc::new(SimStore::new("source", IdScheme::ObjectId));
        source.create_user("A", "a@example.com").await.unwrap();
        let config = SimConfig::with_seed(11);
        let destination = Arc::new(
            SimStore::builder("destination", IdScheme::Uuid)
                .with_faults(
                    config
                        .fault_injector()
                        .with_fault(FaultConfig::always(FaultType::SchemaFail))
                        .build(),
                )
                .build(),
        );

        let err = BulkMigration::new(source, destination.clone())
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Schema(_)));
        assert!(destination.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_failure_leaves_partial_destination() {
        let source = Arc::new(SimStore::new("source", IdScheme::ObjectId));
        for i in 0..3 {
            source
                .create_user(&format!("u{i}"), &format!("u{i}@example.com"))
                .await
                .unwrap();
        }
        let config = SimConfig::with_seed(11);
        let destination = Arc::new(
            SimStore::builder("destination", IdScheme::Uuid)
                .with_faults(
                    config
                        .fault_injector()
                        .with_fault(FaultConfig::after(FaultType::WriteFail, 2))
                        .build(),
                )
                .build(),
        );

        let err = BulkMigration::new(source, destination.clone())
            .run()
            .await
            .unwrap_err();

        assert!(err.is_write());
        assert_eq!(destination.list_users().await.unwrap().len(), 2);
    }
}
