//! Router - Mode-driven read/write routing across two stores
//!
//! TigerStyle: Stateless per call. The only shared state is the immutable
//! strategy, so a `Router` can be cloned into any number of tasks.
//!
//! # Writes
//!
//! Writes go to A, then B, sequentially and without a cross-store
//! transaction. The two copies may differ in identifier and `created_at`.
//!
//! The record returned to the caller comes from the read-priority store:
//! A in `source_only` and `double_write`, B in `read_migration` and
//! `destination_only`. A single-target write returns that target's record.
//! Every returned id can therefore be read back under the same mode.
//!
//! A failed A-side write stops before B is attempted. A failed B-side write
//! after an A-side success is returned as an error and leaves the stores
//! divergent.
//!
//! # Reads
//!
//! Keyed reads try A first when read-A is enabled and return any record it
//! has; otherwise, if read-B is enabled, B answers (possibly with nothing).
//! Listings and the feed go to a single store chosen by the same priority.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::FEED_LIMIT_MAX;
use crate::model::{Comment, CommentView, FeedPost, Post, PostWithComments, SortMode, User};
use crate::storage::{BlogStore, Lookup, StorageError, StorageResult};
use crate::strategy::Strategy;

// =============================================================================
// Sides
// =============================================================================

/// Which of the two stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreSide {
    /// Store A, the migration source.
    Source,
    /// Store B, the migration destination.
    Destination,
}

impl StoreSide {
    /// Get string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Destination => "destination",
        }
    }
}

impl std::fmt::Display for StoreSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value together with the store that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed<T> {
    /// The value
    pub value: T,
    /// Store that served it
    pub side: StoreSide,
}

// =============================================================================
// Dual-Write Outcome
// =============================================================================

/// Records with a store-native identifier, for write logging.
trait Identified {
    fn id(&self) -> &str;
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Post {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Comment {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
enum WriteOutcome<T> {
    Skipped,
    Written(T),
    Failed(StorageError),
}

impl<T> WriteOutcome<T> {
    fn from_result(result: StorageResult<T>) -> Self {
        match result {
            Ok(value) => Self::Written(value),
            Err(e) => Self::Failed(e),
        }
    }
}

/// Both sides of one logical write. Only the primary side is returned to
/// the caller; the other side is logged.
#[derive(Debug)]
struct DualWrite<T> {
    primary_side: StoreSide,
    source: WriteOutcome<T>,
    destination: WriteOutcome<T>,
}

impl<T: Identified> DualWrite<T> {
    /// Write A then B. B is not attempted once A has failed.
    async fn run<FA, FB, A, B>(
        strategy: &Strategy,
        primary_side: StoreSide,
        write_a: FA,
        write_b: FB,
    ) -> Self
    where
        FA: FnOnce() -> A,
        FB: FnOnce() -> B,
        A: Future<Output = StorageResult<T>>,
        B: Future<Output = StorageResult<T>>,
    {
        let source = if strategy.write_a {
            WriteOutcome::from_result(write_a().await)
        } else {
            WriteOutcome::Skipped
        };
        let destination = match source {
            WriteOutcome::Failed(_) => WriteOutcome::Skipped,
            _ if strategy.write_b => WriteOutcome::from_result(write_b().await),
            _ => WriteOutcome::Skipped,
        };

        Self {
            primary_side,
            source,
            destination,
        }
    }

    fn into_result(self, op: &'static str) -> StorageResult<T> {
        let source = match self.source {
            WriteOutcome::Failed(e) => {
                tracing::error!(op, side = "source", error = %e, "write failed");
                return Err(e);
            }
            WriteOutcome::Written(value) => Some(value),
            WriteOutcome::Skipped => None,
        };
        let destination = match self.destination {
            WriteOutcome::Failed(e) => {
                tracing::warn!(
                    op,
                    source_id = source.as_ref().map(Identified::id),
                    error = %e,
                    "destination write failed after source write; stores diverged"
                );
                return Err(e);
            }
            WriteOutcome::Written(value) => Some(value),
            WriteOutcome::Skipped => None,
        };

        if let (Some(a), Some(b)) = (&source, &destination) {
            tracing::debug!(
                op,
                source_id = a.id(),
                destination_id = b.id(),
                returned = %self.primary_side,
                "dual write"
            );
        }

        let (primary, other) = match self.primary_side {
            StoreSide::Source => (source, destination),
            StoreSide::Destination => (destination, source),
        };
        primary
            .or(other)
            .ok_or_else(|| StorageError::internal(format!("{op}: no write target enabled")))
    }
}

// =============================================================================
// Router
// =============================================================================

/// Unified read/write API over the source (A) and destination (B) stores.
#[derive(Clone)]
pub struct Router {
    source: Arc<dyn BlogStore>,
    destination: Arc<dyn BlogStore>,
    strategy: Strategy,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("source", &self.source.name())
            .field("destination", &self.destination.name())
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl Router {
    /// Route between `source` (A) and `destination` (B) with `strategy`.
    #[must_use]
    pub fn new(
        source: Arc<dyn BlogStore>,
        destination: Arc<dyn BlogStore>,
        strategy: Strategy,
    ) -> Self {
        tracing::info!(
            mode = %strategy.mode,
            read_a = strategy.read_a,
            read_b = strategy.read_b,
            write_a = strategy.write_a,
            write_b = strategy.write_b,
            dual_write = strategy.is_dual_write(),
            "router configured"
        );
        Self {
            source,
            destination,
            strategy,
        }
    }

    /// Active strategy.
    #[must_use]
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// The store on `side`.
    #[must_use]
    pub fn store(&self, side: StoreSide) -> &dyn BlogStore {
        match side {
            StoreSide::Source => self.source.as_ref(),
            StoreSide::Destination => self.destination.as_ref(),
        }
    }

    /// Store answering listings and the feed: A when read-A is on, else B.
    #[must_use]
    pub fn read_side(&self) -> StoreSide {
        if self.strategy.read_a {
            StoreSide::Source
        } else {
            StoreSide::Destination
        }
    }

    /// Side whose record a write returns: the read-priority store when both
    /// are written, otherwise the only store written.
    #[must_use]
    pub fn write_primary_side(&self) -> StoreSide {
        if self.strategy.is_dual_write() {
            self.read_side()
        } else if self.strategy.write_a {
            StoreSide::Source
        } else {
            StoreSide::Destination
        }
    }

    fn read_store(&self) -> &dyn BlogStore {
        self.store(self.read_side())
    }

    /// Keyed read with A priority and B fallback.
    async fn read_with_fallback<T, FA, FB, A, B>(
        &self,
        op: &'static str,
        read_a: FA,
        read_b: FB,
    ) -> StorageResult<Option<Routed<T>>>
    where
        FA: FnOnce() -> A,
        FB: FnOnce() -> B,
        A: Future<Output = StorageResult<Lookup<T>>>,
        B: Future<Output = StorageResult<Lookup<T>>>,
    {
        if self.strategy.read_a {
            if let Lookup::Found(value) = read_a().await? {
                return Ok(Some(Routed {
                    value,
                    side: StoreSide::Source,
                }));
            }
        }
        if self.strategy.read_b {
            let found = read_b().await?.into_option();
            if self.strategy.read_a && found.is_some() {
                tracing::debug!(op, "served from destination after source miss");
            }
            return Ok(found.map(|value| Routed {
                value,
                side: StoreSide::Destination,
            }));
        }
        Ok(None)
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// Create a user in every enabled write target.
    ///
    /// # Errors
    /// Any write failure, unretried.
    pub async fn create_user(&self, name: &str, email: &str) -> StorageResult<User> {
        DualWrite::run(
            &self.strategy,
            self.write_primary_side(),
            || self.source.create_user(name, email),
            || self.destination.create_user(name, email),
        )
        .await
        .into_result("create_user")
    }

    /// Look up a user with source priority.
    ///
    /// # Errors
    /// Store failures only; an unknown or malformed id is `Ok(None)`.
    pub async fn get_user(&self, id: &str) -> StorageResult<Option<User>> {
        let routed = self
            .read_with_fallback(
                "get_user",
                || self.source.get_user(id),
                || self.destination.get_user(id),
            )
            .await?;
        Ok(routed.map(|r| r.value))
    }

    /// All users from the read store.
    ///
    /// # Errors
    /// Store failures.
    pub async fn list_users(&self) -> StorageResult<Vec<User>> {
        self.read_store().list_users().await
    }

    /// Posts by `user_id` in the read store.
    ///
    /// # Errors
    /// Store failures.
    pub async fn count_posts_by_user(&self, user_id: &str) -> StorageResult<u64> {
        self.read_store().count_posts_by_user(user_id).await
    }

    // -------------------------------------------------------------------------
    // Posts
    // -------------------------------------------------------------------------

    /// Create a post in every enabled write target. `user_id` is passed
    /// through unchanged to both stores.
    ///
    /// # Errors
    /// Any write failure, unretried.
    pub async fn create_post(&self, user_id: &str, title: &str, content: &str) -> StorageResult<Post> {
        DualWrite::run(
            &self.strategy,
            self.write_primary_side(),
            || self.source.create_post(user_id, title, content),
            || self.destination.create_post(user_id, title, content),
        )
        .await
        .into_result("create_post")
    }

    /// Look up a post with source priority.
    ///
    /// # Errors
    /// Store failures only.
    pub async fn get_post(&self, id: &str) -> StorageResult<Option<Post>> {
        Ok(self.get_post_routed(id).await?.map(|r| r.value))
    }

    /// Like [`Router::get_post`], also reporting which store answered.
    ///
    /// # Errors
    /// Store failures only.
    pub async fn get_post_routed(&self, id: &str) -> StorageResult<Option<Routed<Post>>> {
        self.read_with_fallback(
            "get_post",
            || self.source.get_post(id),
            || self.destination.get_post(id),
        )
        .await
    }

    // -------------------------------------------------------------------------
    // Comments
    // -------------------------------------------------------------------------

    /// Create a comment in every enabled write target.
    ///
    /// # Errors
    /// Any write failure, unretried.
    pub async fn create_comment(
        &self,
        post_id: &str,
        user_id: &str,
        content: &str,
    ) -> StorageResult<Comment> {
        DualWrite::run(
            &self.strategy,
            self.write_primary_side(),
            || self.source.create_comment(post_id, user_id, content),
            || self.destination.create_comment(post_id, user_id, content),
        )
        .await
        .into_result("create_comment")
    }

    /// Comments on a post from the read store, oldest first.
    ///
    /// # Errors
    /// Store failures.
    pub async fn get_comments_for_post(&self, post_id: &str) -> StorageResult<Vec<Comment>> {
        self.read_store().get_comments_for_post(post_id).await
    }

    // -------------------------------------------------------------------------
    // Compositions
    // -------------------------------------------------------------------------

    /// A post with its author, author post count and comments.
    ///
    /// The post count comes from the store that served the post. The author
    /// and each commenter are looked up independently with source priority,
    /// so names may come from a different store than the post.
    ///
    /// # Errors
    /// Store failures only; a missing post is `Ok(None)`.
    pub async fn get_post_with_comments(
        &self,
        post_id: &str,
    ) -> StorageResult<Option<PostWithComments>> {
        let Some(Routed { value: post, side }) = self.get_post_routed(post_id).await? else {
            return Ok(None);
        };

        let author = self.get_user(&post.user_id).await?;
        let author_post_count = self.store(side).count_posts_by_user(&post.user_id).await?;

        let comments = self.get_comments_for_post(post_id).await?;
        let mut views = Vec::with_capacity(comments.len());
        for comment in comments {
            let commenter = self.get_user(&comment.user_id).await?;
            views.push(CommentView::new(comment, commenter.as_ref()));
        }

        Ok(Some(PostWithComments {
            post: FeedPost::new(post, author.as_ref(), author_post_count),
            comments: views,
        }))
    }

    /// One page of the feed from the read store, enriched in that store.
    ///
    /// # Errors
    /// Store failures.
    pub async fn feed_posts(&self, sort: SortMode, limit: usize) -> StorageResult<Vec<FeedPost>> {
        let limit = limit.min(FEED_LIMIT_MAX);
        let store = self.read_store();
        tracing::debug!(store = store.name(), %sort, limit, "feed");
        store.feed_posts(sort, limit).await
    }

    /// The feed with every post expanded to include its comments.
    ///
    /// # Errors
    /// Store failures.
    pub async fn feed_with_comments(
        &self,
        sort: SortMode,
        limit: usize,
    ) -> StorageResult<Vec<PostWithComments>> {
        let feed = self.feed_posts(sort, limit).await?;
        let mut expanded = Vec::with_capacity(feed.len());
        for entry in feed {
            let full = self.get_post_with_comments(&entry.post.id).await?;
            expanded.push(full.unwrap_or(PostWithComments {
                post: entry,
                comments: Vec::new(),
            }));
        }
        Ok(expanded)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::AUTHOR_NAME_UNKNOWN;
    use crate::dst::{FaultConfig, FaultType, SimConfig};
    use crate::id::IdScheme;
    use crate::storage::SimStore;
    use crate::strategy::MigrationMode;

    struct Fixture {
        source: Arc<SimStore>,
        destination: Arc<SimStore>,
        router: Router,
    }

    fn fixture(mode: MigrationMode) -> Fixture {
        fixture_with(mode, SimStore::new("destination", IdScheme::Uuid))
    }

    fn fixture_with(mode: MigrationMode, destination: SimStore) -> Fixture {
        let source = Arc::new(SimStore::new("source", IdScheme::ObjectId));
        let destination = Arc::new(destination);
        let router = Router::new(
            source.clone(),
            destination.clone(),
            Strategy::resolve(mode, false),
        );
        Fixture {
            source,
            destination,
            router,
        }
    }

    fn failing(name: &str, fault: FaultConfig) -> SimStore {
        let config = SimConfig::with_seed(7);
        SimStore::builder(name, IdScheme::Uuid)
            .with_faults(config.fault_injector().with_fault(fault).build())
            .build()
    }

    #[tokio::test]
    async fn test_create_then_get_user_in_every_mode() {
        for mode in MigrationMode::all() {
            let f = fixture(*mode);
            let user = f.router.create_user("Ada", "ada@example.com").await.unwrap();

            let found = f.router.get_user(&user.id).await.unwrap();
            let found = found.unwrap_or_else(|| panic!("user missing in {mode}"));
            assert_eq!(found.name, "Ada");
            assert_eq!(found.email, "ada@example.com");
        }
    }

    #[tokio::test]
    async fn test_write_targets_follow_mode() {
        let f = fixture(MigrationMode::SourceOnly);
        f.router.create_user("A", "a@example.com").await.unwrap();
        assert_eq!(f.source.list_users().await.unwrap().len(), 1);
        assert!(f.destination.list_users().await.unwrap().is_empty());

        let f = fixture(MigrationMode::DestinationOnly);
        let user = f.router.create_user("B", "b@example.com").await.unwrap();
        assert!(f.source.list_users().await.unwrap().is_empty());
        assert!(IdScheme::Uuid.parse(&user.id).is_some());
    }

    #[tokio::test]
    async fn test_dual_write_returns_source_record() {
        let f = fixture(MigrationMode::DoubleWrite);
        let post = f.router.create_post("u", "Title", "Body").await.unwrap();

        assert!(IdScheme::ObjectId.parse(&post.id).is_some());
        let copies = f.destination.list_posts().await.unwrap();
        assert_eq!(copies.len(), 1);
        assert_ne!(copies[0].id, post.id);
        assert_eq!(copies[0].title, "Title");
    }

    #[tokio::test]
    async fn test_read_migration_returns_readable_record() {
        let f = fixture(MigrationMode::ReadMigration);
        let user = f.router.create_user("Ada", "ada@example.com").await.unwrap();

        // Both stores written, but the returned id lives where reads go
        assert_eq!(f.source.list_users().await.unwrap().len(), 1);
        assert!(IdScheme::Uuid.parse(&user.id).is_some());
        assert_eq!(f.router.write_primary_side(), StoreSide::Destination);
    }

    #[tokio::test]
    async fn test_source_failure_skips_destination() {
        let config = SimConfig::with_seed(3);
        let source = Arc::new(
            SimStore::builder("source", IdScheme::ObjectId)
                .with_faults(
                    config
                        .fault_injector()
                        .with_fault(FaultConfig::always(FaultType::WriteFail))
                        .build(),
                )
                .build(),
        );
        let destination = Arc::new(SimStore::new("destination", IdScheme::Uuid));
        let router = Router::new(
            source.clone(),
            destination.clone(),
            Strategy::resolve(MigrationMode::DoubleWrite, false),
        );

        let err = router.create_user("A", "a@example.com").await.unwrap_err();

        assert!(err.is_write());
        assert!(destination.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_destination_failure_propagates_and_diverges() {
        let f = fixture_with(
            MigrationMode::DoubleWrite,
            failing("destination", FaultConfig::always(FaultType::WriteFail)),
        );

        let err = f.router.create_user("A", "a@example.com").await.unwrap_err();

        assert!(err.is_write());
        // Source write is kept; no rollback
        assert_eq!(f.source.list_users().await.unwrap().len(), 1);
        assert!(f.destination.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_migration_does_not_fall_back_to_source() {
        let f = fixture(MigrationMode::ReadMigration);
        let only_in_source = f.source.create_post("u", "old", "not migrated").await.unwrap();

        assert!(f.router.get_post(&only_in_source.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_error_is_not_swallowed() {
        let f = fixture_with(
            MigrationMode::ReadMigration,
            failing("destination", FaultConfig::always(FaultType::ReadFail)),
        );

        assert!(matches!(
            f.router.get_user("anything").await,
            Err(StorageError::Read(_))
        ));
    }

    #[tokio::test]
    async fn test_get_post_with_comments() {
        let f = fixture(MigrationMode::SourceOnly);
        let author = f.router.create_user("Author", "a@example.com").await.unwrap();
        let reader = f.router.create_user("Reader", "r@example.com").await.unwrap();
        let post = f.router.create_post(&author.id, "T", "C").await.unwrap();
        f.router.create_post(&author.id, "T2", "C2").await.unwrap();
        f.router.create_comment(&post.id, &reader.id, "nice").await.unwrap();
        f.router.create_comment(&post.id, "ghost", "boo").await.unwrap();

        let full = f.router.get_post_with_comments(&post.id).await.unwrap().unwrap();

        assert_eq!(full.post.post.id, post.id);
        assert_eq!(full.post.author_name, "Author");
        assert_eq!(full.post.author_post_count, 2);
        assert_eq!(full.comments.len(), 2);
        assert_eq!(full.comments[0].user_name, "Reader");
        assert_eq!(full.comments[1].user_name, AUTHOR_NAME_UNKNOWN);
    }

    #[tokio::test]
    async fn test_get_post_with_comments_missing() {
        let f = fixture(MigrationMode::DoubleWrite);
        assert!(f
            .router
            .get_post_with_comments("000000000000000000000000")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_feed_uses_single_read_store() {
        let f = fixture(MigrationMode::ReadMigration);
        f.source.create_post("u", "source only", "").await.unwrap();
        f.destination.create_post("u", "destination only", "").await.unwrap();

        let feed = f.router.feed_posts(SortMode::Date, 10).await.unwrap();

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].post.title, "destination only");
    }

    #[tokio::test]
    async fn test_feed_with_comments() {
        let f = fixture(MigrationMode::SourceOnly);
        let user = f.router.create_user("U", "u@example.com").await.unwrap();
        let post = f.router.create_post(&user.id, "T", "C").await.unwrap();
        f.router.create_comment(&post.id, &user.id, "hi").await.unwrap();

        let feed = f.router.feed_with_comments(SortMode::Date, 10).await.unwrap();

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].comments.len(), 1);
        assert_eq!(feed[0].comments[0].user_name, "U");
    }

    #[tokio::test]
    async fn test_double_write_composition_reads_source_only() {
        let f = fixture(MigrationMode::DoubleWrite);
        let only_in_b = f.destination.create_user("Bea", "b@example.com").await.unwrap();
        let post = f.source.create_post(&only_in_b.id, "T", "C").await.unwrap();
        f.source.create_post(&only_in_b.id, "T2", "C2").await.unwrap();
        f.destination.create_post(&only_in_b.id, "T3", "C3").await.unwrap();

        let full = f.router.get_post_with_comments(&post.id).await.unwrap().unwrap();

        // read-B is off in double_write, so B is never consulted
        assert_eq!(full.post.author_name, AUTHOR_NAME_UNKNOWN);
        assert_eq!(full.post.author_post_count, 2);
    }

    #[tokio::test]
    async fn test_composition_sub_reads_fall_back_independently() {
        let source = Arc::new(SimStore::new("source", IdScheme::ObjectId));
        let destination = Arc::new(SimStore::new("destination", IdScheme::Uuid));
        let strategy = Strategy {
            read_b: true,
            ..Strategy::resolve(MigrationMode::DoubleWrite, false)
        };
        let router = Router::new(source.clone(), destination.clone(), strategy);

        let author = destination.create_user("Bea", "b@example.com").await.unwrap();
        let commenter = destination.create_user("Cal", "c@example.com").await.unwrap();
        let post = source.create_post(&author.id, "T", "C").await.unwrap();
        source.create_post(&author.id, "T2", "C2").await.unwrap();
        destination.create_post(&author.id, "T3", "C3").await.unwrap();
        source.create_comment(&post.id, &commenter.id, "hi").await.unwrap();

        let routed = router.get_post_routed(&post.id).await.unwrap().unwrap();
        assert_eq!(routed.side, StoreSide::Source);

        let full = router.get_post_with_comments(&post.id).await.unwrap().unwrap();
        assert_eq!(full.post.author_name, "Bea");
        assert_eq!(full.post.author_post_count, 2);
        assert_eq!(full.comments.len(), 1);
        assert_eq!(full.comments[0].user_name, "Cal");
    }

    #[tokio::test]
    async fn test_extra_write_fans_out_but_reads_source() {
        let source = Arc::new(SimStore::new("source", IdScheme::ObjectId));
        let destination = Arc::new(SimStore::new("destination", IdScheme::Uuid));
        let router = Router::new(
            source.clone(),
            destination.clone(),
            Strategy::resolve(MigrationMode::SourceOnly, true),
        );

        let user = router.create_user("Ada", "ada@example.com").await.unwrap();
        assert!(IdScheme::ObjectId.parse(&user.id).is_some());
        assert_eq!(source.list_users().await.unwrap().len(), 1);
        assert_eq!(destination.list_users().await.unwrap().len(), 1);

        let in_b_only = destination.create_user("Bea", "b@example.com").await.unwrap();
        assert!(router.get_user(&in_b_only.id).await.unwrap().is_none());
        assert_eq!(router.list_users().await.unwrap().len(), 1);
        assert_eq!(router.read_side(), StoreSide::Source);
        assert_eq!(router.write_primary_side(), StoreSide::Source);
    }

    #[tokio::test]
    async fn test_read_side() {
        assert_eq!(
            fixture(MigrationMode::DoubleWrite).router.read_side(),
            StoreSide::Source
        );
        assert_eq!(
            fixture(MigrationMode::ReadMigration).router.read_side(),
            StoreSide::Destination
        );
    }
}
