//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{ItemRef, Snowflake};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Parent comment not found on this post: {0}")]
    ParentCommentNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Body must not be empty")]
    EmptyBody,

    #[error("Body too short: min {min} characters")]
    BodyTooShort { min: usize },

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Body contains disallowed markup: {0}")]
    UnsafeContent(&'static str),

    #[error("Invalid reaction kind: {0}")]
    InvalidReactionKind(String),

    #[error("Invalid vote value: {0}")]
    InvalidVoteValue(String),

    #[error("Invalid item kind: {0}")]
    InvalidItemKind(String),

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("Authentication required")]
    Unauthenticated,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not post author")]
    NotPostAuthor,

    #[error("Not comment author")]
    NotCommentAuthor,

    #[error("Privileged access required")]
    PrivilegeRequired,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Conflict: {0}")]
    Conflict(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// The not-found error matching an item's kind
    pub fn item_not_found(item: ItemRef) -> Self {
        match item {
            ItemRef::Post(id) => Self::PostNotFound(id),
            ItemRef::Comment(id) => Self::CommentNotFound(id),
        }
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::ParentCommentNotFound(_) => "UNKNOWN_PARENT_COMMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyBody => "EMPTY_BODY",
            Self::BodyTooShort { .. } => "BODY_TOO_SHORT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::UnsafeContent(_) => "UNSAFE_CONTENT",
            Self::InvalidReactionKind(_) => "INVALID_REACTION_KIND",
            Self::InvalidVoteValue(_) => "INVALID_VOTE_VALUE",
            Self::InvalidItemKind(_) => "INVALID_ITEM_KIND",

            // Authentication
            Self::Unauthenticated => "UNAUTHENTICATED",

            // Authorization
            Self::NotPostAuthor => "NOT_POST_AUTHOR",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",
            Self::PrivilegeRequired => "PRIVILEGE_REQUIRED",

            // Conflict
            Self::Conflict(_) => "CONFLICT",

            // Infrastructure
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PostNotFound(_) | Self::CommentNotFound(_) | Self::ParentCommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyBody
                | Self::BodyTooShort { .. }
                | Self::ContentTooLong { .. }
                | Self::UnsafeContent(_)
                | Self::InvalidReactionKind(_)
                | Self::InvalidVoteValue(_)
                | Self::InvalidItemKind(_)
        )
    }

    /// Check if the caller supplied no identity
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotPostAuthor | Self::NotCommentAuthor | Self::PrivilegeRequired
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Check if the backing store could not be reached
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}
