//! Model - Users, posts, comments and their read compositions
//!
//! TigerStyle: Explicit fields. Records are immutable once created; every
//! `id` and foreign key is only meaningful inside the store that holds it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::AUTHOR_NAME_UNKNOWN;

// =============================================================================
// Stored Records
// =============================================================================

/// An author or commenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-native identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Assigned by the store at creation
    pub created_at: DateTime<Utc>,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Store-native identifier
    pub id: String,
    /// Author, in this store's identifier space
    pub user_id: String,
    /// Title
    pub title: String,
    /// Body; empty when absent
    pub content: String,
    /// Assigned by the store at creation
    pub created_at: DateTime<Utc>,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Store-native identifier
    pub id: String,
    /// Commented post, in this store's identifier space
    pub post_id: String,
    /// Commenter, in this store's identifier space
    pub user_id: String,
    /// Body
    pub content: String,
    /// Assigned by the store at creation
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Read Compositions
// =============================================================================

/// A post enriched with its author, computed in the store it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPost {
    /// The post itself
    #[serde(flatten)]
    pub post: Post,
    /// Author display name, or "Unknown"
    pub author_name: String,
    /// Number of posts by the same author in the same store
    pub author_post_count: u64,
}

impl FeedPost {
    /// Enrich a post. A missing author becomes "Unknown".
    #[must_use]
    pub fn new(post: Post, author: Option<&User>, author_post_count: u64) -> Self {
        Self {
            post,
            author_name: author_name_or_unknown(author),
            author_post_count,
        }
    }
}

/// A comment as shown under a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    /// Commenter identifier
    pub user_id: String,
    /// Commenter display name, or "Unknown"
    pub user_name: String,
    /// Body
    pub content: String,
}

impl CommentView {
    /// Build the view of `comment` with its (possibly missing) author.
    #[must_use]
    pub fn new(comment: Comment, author: Option<&User>) -> Self {
        Self {
            user_id: comment.user_id,
            user_name: author_name_or_unknown(author),
            content: comment.content,
        }
    }
}

/// A single post with author details and all of its comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithComments {
    /// Post and author details
    #[serde(flatten)]
    pub post: FeedPost,
    /// Comments, oldest first
    pub comments: Vec<CommentView>,
}

fn author_name_or_unknown(author: Option<&User>) -> String {
    author.map_or_else(|| AUTHOR_NAME_UNKNOWN.to_string(), |u| u.name.clone())
}

// =============================================================================
// Sort Mode
// =============================================================================

/// Feed ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Newest first
    #[default]
    Date,
    /// Case-insensitive A-Z by content
    Content,
}

impl SortMode {
    /// Get string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Content => "content",
        }
    }

    /// Parse a request parameter. Anything other than "content" means date.
    #[must_use]
    pub fn from_param(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("content") {
            Self::Content
        } else {
            Self::Date
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Ordering
// =============================================================================

/// Sort key for content ordering: case-insensitive, empty first.
#[must_use]
pub fn content_sort_key(content: &str) -> String {
    content.to_lowercase()
}

/// Sort posts newest first. Stable, so equal timestamps keep store order.
pub fn sort_by_date_desc(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Sort posts by case-insensitive content. Stable, so ties keep store order.
pub fn sort_by_content(posts: &mut [Post]) {
    posts.sort_by_cached_key(|p| content_sort_key(&p.content));
}
