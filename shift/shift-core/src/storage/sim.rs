//! SimStore - In-memory store for simulation and local runs
//!
//! TigerStyle: Deterministic when built with a `SimClock` and seeded RNG,
//! with fault injection on reads, writes and schema setup.
//!
//! Rows live in insertion order, which is this store's native order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::dst::{DeterministicRng, FaultInjector, FaultType, SimClock};
use crate::id::IdScheme;
use crate::model::{self, Comment, Post, User};

use super::backend::{BlogStore, Lookup};
use super::error::{StorageError, StorageResult};

#[derive(Debug, Default)]
struct SimTables {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

/// In-memory [`BlogStore`].
#[derive(Debug)]
pub struct SimStore {
    name: String,
    scheme: IdScheme,
    clock: Option<SimClock>,
    rng: Option<DeterministicRng>,
    faults: Option<FaultInjector>,
    tables: RwLock<SimTables>,
}

impl SimStore {
    /// Empty store using the system clock and no faults.
    #[must_use]
    pub fn new(name: impl Into<String>, scheme: IdScheme) -> Self {
        Self::builder(name, scheme).build()
    }

    /// Builder for a store with simulated time, seeded ids or faults.
    #[must_use]
    pub fn builder(name: impl Into<String>, scheme: IdScheme) -> SimStoreBuilder {
        SimStoreBuilder {
            name: name.into(),
            scheme,
            clock: None,
            rng: None,
            faults: None,
        }
    }

    /// Remove every row. Used by operators before re-running a bulk copy.
    pub async fn truncate(&self) {
        let mut tables = self.tables.write().await;
        *tables = SimTables::default();
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.as_ref().map_or_else(Utc::now, SimClock::now)
    }

    fn new_id(&self, now: DateTime<Utc>) -> String {
        self.scheme.generate(now, self.rng.as_ref())
    }

    fn check(&self, fault_type: FaultType, op: &str) -> StorageResult<()> {
        let fire = self
            .faults
            .as_ref()
            .is_some_and(|faults| faults.should_fail(fault_type));
        if !fire {
            return Ok(());
        }
        let msg = format!("{}: injected fault during {op}", self.name);
        Err(match fault_type {
            FaultType::WriteFail => StorageError::write(msg),
            FaultType::ReadFail => StorageError::read(msg),
            FaultType::SchemaFail => StorageError::schema(msg),
        })
    }

    /// Canonical form of `id` in this store, or `None` if malformed.
    fn canonical(&self, id: &str) -> Option<String> {
        self.scheme.parse(id)
    }
}

/// Builder for [`SimStore`].
#[derive(Debug)]
pub struct SimStoreBuilder {
    name: String,
    scheme: IdScheme,
    clock: Option<SimClock>,
    rng: Option<DeterministicRng>,
    faults: Option<FaultInjector>,
}

impl SimStoreBuilder {
    /// Stamp `created_at` from a simulated clock.
    #[must_use]
    pub fn with_clock(mut self, clock: SimClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Draw identifier randomness from a seeded RNG.
    #[must_use]
    pub fn with_rng(mut self, rng: DeterministicRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Inject faults.
    #[must_use]
    pub fn with_faults(mut self, faults: FaultInjector) -> Self {
        self.faults = Some(faults);
        self
    }

    /// Build the store.
    #[must_use]
    pub fn build(self) -> SimStore {
        SimStore {
            name: self.name,
            scheme: self.scheme,
            clock: self.clock,
            rng: self.rng,
            faults: self.faults,
            tables: RwLock::new(SimTables::default()),
        }
    }
}

// =============================================================================
// BlogStore Implementation
// =============================================================================

#[async_trait]
impl BlogStore for SimStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn ensure_schema(&self) -> StorageResult<()> {
        self.check(FaultType::SchemaFail, "ensure_schema")
    }

    async fn create_user(&self, name: &str, email: &str) -> StorageResult<User> {
        self.check(FaultType::WriteFail, "create_user")?;

        let now = self.now();
        let user = User {
            id: self.new_id(now),
            name: name.to_string(),
            email: email.to_string(),
            created_at: now,
        };
        self.tables.write().await.users.push(user.clone());

        tracing::debug!(store = %self.name, id = %user.id, "created user");
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> StorageResult<Lookup<User>> {
        self.check(FaultType::ReadFail, "get_user")?;

        let Some(id) = self.canonical(id) else {
            return Ok(Lookup::NotFound);
        };
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned().into())
    }

    async fn list_users(&self) -> StorageResult<Vec<User>> {
        self.check(FaultType::ReadFail, "list_users")?;
        Ok(self.tables.read().await.users.clone())
    }

    async fn count_posts_by_user(&self, user_id: &str) -> StorageResult<u64> {
        self.check(FaultType::ReadFail, "count_posts_by_user")?;

        let tables = self.tables.read().await;
        let count = tables.posts.iter().filter(|p| p.user_id == user_id).count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn create_post(&self, user_id: &str, title: &str, content: &str) -> StorageResult<Post> {
        self.check(FaultType::WriteFail, "create_post")?;

        let now = self.now();
        let post = Post {
            id: self.new_id(now),
            user_id: user_id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
        };
        self.tables.write().await.posts.push(post.clone());

        tracing::debug!(store = %self.name, id = %post.id, "created post");
        Ok(post)
    }

    async fn get_post(&self, id: &str) -> StorageResult<Lookup<Post>> {
        self.check(FaultType::ReadFail, "get_post")?;

        let Some(id) = self.canonical(id) else {
            return Ok(Lookup::NotFound);
        };
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned().into())
    }

    async fn list_posts(&self) -> StorageResult<Vec<Post>> {
        self.check(FaultType::ReadFail, "list_posts")?;
        Ok(self.tables.read().await.posts.clone())
    }

    async fn list_posts_by_date(&self, limit: usize) -> StorageResult<Vec<Post>> {
        let mut posts = self.list_posts().await?;
        model::sort_by_date_desc(&mut posts);
        posts.truncate(limit);
        Ok(posts)
    }

    async fn list_posts_by_content(&self, limit: usize) -> StorageResult<Vec<Post>> {
        let mut posts = self.list_posts().await?;
        model::sort_by_content(&mut posts);
        posts.truncate(limit);
        Ok(posts)
    }

    async fn create_comment(
        &self,
        post_id: &str,
        user_id: &str,
        content: &str,
    ) -> StorageResult<Comment> {
        self.check(FaultType::WriteFail, "create_comment")?;

        let now = self.now();
        let comment = Comment {
            id: self.new_id(now),
            post_id: post_id.to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
            created_at: now,
        };
        self.tables.write().await.comments.push(comment.clone());

        tracing::debug!(store = %self.name, id = %comment.id, "created comment");
        Ok(comment)
    }

    async fn get_comments_for_post(&self, post_id: &str) -> StorageResult<Vec<Comment>> {
        self.check(FaultType::ReadFail, "get_comments_for_post")?;

        let canonical = self.canonical(post_id);
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| {
                c.post_id == post_id || canonical.as_deref() == Some(c.post_id.as_str())
            })
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn list_comments(&self) -> StorageResult<Vec<Comment>> {
        self.check(FaultType::ReadFail, "list_comments")?;
        Ok(self.tables.read().await.comments.clone())
    }
}

// =============================================================================
// Tests
// =============================================================================
