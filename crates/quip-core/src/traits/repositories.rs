//! Repository traits (ports) - define the interface for data access
//!
//! The Content Store is split into [`PostRepository`] and
//! [`CommentRepository`]; the Interaction Store into [`VoteRepository`] and
//! [`ReactionRepository`]. Implementations must be safe to call from many
//! tasks at once and rely on the store's own constraints (not in-process
//! locks) for correctness.

use async_trait::async_trait;

use crate::entities::{Comment, Post, Reaction, Vote};
use crate::error::DomainError;
use crate::logic::{ReactionTally, VoteTally};
use crate::value_objects::{
    ItemKind, ItemRef, PageRequest, PostQuery, ReactionKind, Snowflake, VoteValue,
};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Check whether a post exists
    async fn exists(&self, id: Snowflake) -> RepoResult<bool>;

    /// One page of posts in the requested order.
    ///
    /// Ties on the sort key are broken by id ascending.
    async fn list(&self, query: &PostQuery) -> RepoResult<Vec<Post>>;

    /// Insert a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Hard delete a post together with its comments and every vote and
    /// reaction attached to either. Deleting a missing id is a no-op.
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID, including soft-deleted rows
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Every comment of a post, soft-deleted ones included, in no
    /// particular order
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>>;

    /// Insert a comment.
    ///
    /// Fails with `PostNotFound` if the post does not exist and with
    /// `ParentCommentNotFound` if the parent is missing or belongs to a
    /// different post.
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Mark a comment deleted; fails with `CommentNotFound` if no row matches
    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Number of comment rows per post, for the given posts.
    /// Posts without comments may be omitted.
    async fn count_by_posts(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, i64)>>;

    /// Most recent comments across all posts, newest first
    async fn list_recent(&self, page: PageRequest) -> RepoResult<Vec<Comment>>;
}

// ============================================================================
// Vote Repository
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Insert or overwrite the user's vote in a single atomic statement
    async fn upsert(&self, vote: &Vote) -> RepoResult<()>;

    /// Remove the user's vote; absence is not an error
    async fn remove(&self, item: ItemRef, user_id: Snowflake) -> RepoResult<()>;

    /// The user's current vote on an item
    async fn find(&self, item: ItemRef, user_id: Snowflake) -> RepoResult<Option<VoteValue>>;

    /// Vote counts grouped by item and value
    async fn tally(&self, kind: ItemKind, ids: &[Snowflake]) -> RepoResult<Vec<VoteTally>>;

    /// One user's votes across a batch of items
    async fn find_for_user(
        &self,
        kind: ItemKind,
        ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<(Snowflake, VoteValue)>>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Insert if absent; duplicates are silently ignored
    async fn add(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Delete if present
    async fn remove(&self, item: ItemRef, user_id: Snowflake, kind: ReactionKind)
        -> RepoResult<()>;

    /// Whether the user holds this reaction on the item
    async fn exists(&self, item: ItemRef, user_id: Snowflake, kind: ReactionKind)
        -> RepoResult<bool>;

    /// Reaction counts grouped by item and kind
    async fn tally(&self, kind: ItemKind, ids: &[Snowflake]) -> RepoResult<Vec<ReactionTally>>;

    /// One user's reactions across a batch of items
    async fn find_for_user(
        &self,
        kind: ItemKind,
        ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<(Snowflake, ReactionKind)>>;
}
