//! Request DTOs for API endpoints
//!
//! Body DTOs implement `Deserialize` and `Validate`. The validator only
//! guards shape; content rules (trimming, length bounds, unsafe markup)
//! are enforced by the domain on the trimmed body when the service runs.

use quip_core::Snowflake;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Content Requests
// ============================================================================

/// New post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "Body must not be empty"))]
    pub body: String,
}

/// New comment, optionally replying to another comment on the same post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Body must not be empty"))]
    pub body: String,

    #[serde(default)]
    pub parent_id: Option<Snowflake>,
}

// ============================================================================
// Interaction Requests
// ============================================================================

/// Vote on a post or comment
///
/// `"plus"` or `"minus"` sets the vote; `""`, `null` or a missing field
/// removes it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct VoteRequest {
    #[serde(default)]
    pub vote: Option<String>,
}

impl VoteRequest {
    pub fn wire_value(&self) -> &str {
        self.vote.as_deref().unwrap_or("")
    }
}

/// Toggle a reaction; the kind is checked against the vocabulary by the service
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReactionRequest {
    #[validate(length(min = 1, max = 32, message = "Reaction kind must be 1-32 characters"))]
    pub kind: String,
}
