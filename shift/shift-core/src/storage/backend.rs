//! BlogStore - the adapter contract
//!
//! Both stores implement the same narrow CRUD surface. Each adapter owns its
//! identifier generation, timestamping and query execution; nothing above it
//! knows which engine it talks to.

use async_trait::async_trait;

use crate::model::{Comment, FeedPost, Post, SortMode, User};

use super::error::StorageResult;

// =============================================================================
// Lookup
// =============================================================================

/// Outcome of a lookup by identifier.
///
/// A malformed identifier and an unknown identifier both collapse to
/// `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The record exists.
    Found(T),
    /// No record for this identifier.
    NotFound,
}

impl<T> Lookup<T> {
    /// True when a record was found.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Convert to an `Option`.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotFound, Self::Found)
    }
}

// =============================================================================
// BlogStore Trait
// =============================================================================

/// CRUD contract over users, posts and comments for one backing store.
///
/// Every create performs exactly one durable write and never retries.
/// Lookups never fail on a bad identifier; only genuine store failures are
/// returned as errors.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &str;

    /// Create namespace, tables and indexes if absent. Idempotent.
    async fn ensure_schema(&self) -> StorageResult<()>;

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// Create a user with a freshly generated native identifier.
    async fn create_user(&self, name: &str, email: &str) -> StorageResult<User>;

    /// Look up a user.
    async fn get_user(&self, id: &str) -> StorageResult<Lookup<User>>;

    /// All users in store-native order.
    async fn list_users(&self) -> StorageResult<Vec<User>>;

    /// Number of posts in this store whose `user_id` equals `user_id`.
    ///
    /// Post `user_id` values are stored verbatim, so this compares strings
    /// exactly without parsing.
    async fn count_posts_by_user(&self, user_id: &str) -> StorageResult<u64>;

    // -------------------------------------------------------------------------
    // Posts
    // -------------------------------------------------------------------------

    /// Create a post. `user_id` is stored verbatim.
    async fn create_post(&self, user_id: &str, title: &str, content: &str) -> StorageResult<Post>;

    /// Look up a post.
    async fn get_post(&self, id: &str) -> StorageResult<Lookup<Post>>;

    /// All posts in store-native order.
    async fn list_posts(&self) -> StorageResult<Vec<Post>>;

    /// Newest first, ties in store-native order.
    async fn list_posts_by_date(&self, limit: usize) -> StorageResult<Vec<Post>>;

    /// Case-insensitive A-Z by content, empty content first.
    async fn list_posts_by_content(&self, limit: usize) -> StorageResult<Vec<Post>>;

    // -------------------------------------------------------------------------
    // Comments
    // -------------------------------------------------------------------------

    /// Create a comment. `post_id` and `user_id` are stored verbatim.
    async fn create_comment(
        &self,
        post_id: &str,
        user_id: &str,
        content: &str,
    ) -> StorageResult<Comment>;

    /// Comments on a post, oldest first.
    ///
    /// Matches the id as given and in this store's canonical form, so any
    /// spelling `get_post` accepts also finds the comments.
    async fn get_comments_for_post(&self, post_id: &str) -> StorageResult<Vec<Comment>>;

    /// All comments in store-native order.
    async fn list_comments(&self) -> StorageResult<Vec<Comment>>;

    // -------------------------------------------------------------------------
    // Feed
    // -------------------------------------------------------------------------

    /// One page of the feed, each post enriched from this store only.
    async fn feed_posts(&self, sort: SortMode, limit: usize) -> StorageResult<Vec<FeedPost>> {
        let posts = match sort {
            SortMode::Content => self.list_posts_by_content(limit).await?,
            SortMode::Date => self.list_posts_by_date(limit).await?,
        };

        let mut feed = Vec::with_capacity(posts.len());
        for post in posts {
            let count = self.count_posts_by_user(&post.user_id).await?;
            let author = self.get_user(&post.user_id).await?.into_option();
            feed.push(FeedPost::new(post, author.as_ref(), count));
        }

        // Postcondition
        debug_assert!(feed.len() <= limit, "feed exceeds limit");
        Ok(feed)
    }
}
