//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities and aggregates to
//! response DTOs.

use quip_core::entities::{Comment, Post};
use quip_core::{Aggregate, ItemRef, ViewerState};

use super::responses::{CommentResponse, PostResponse, StatsResponse, ViewerResponse};

// ============================================================================
// Interaction Mappers
// ============================================================================

impl From<&ViewerState> for ViewerResponse {
    fn from(state: &ViewerState) -> Self {
        Self {
            vote: state.vote,
            reactions: state.reactions.iter().copied().collect(),
        }
    }
}

impl From<ViewerState> for ViewerResponse {
    fn from(state: ViewerState) -> Self {
        Self::from(&state)
    }
}

impl StatsResponse {
    pub fn new(item: ItemRef, stats: Aggregate) -> Self {
        Self {
            item_kind: item.kind(),
            item_id: item.id().to_string(),
            score: stats.score,
            reactions: stats.reaction_counts,
            viewer: stats.viewer.map(ViewerResponse::from),
        }
    }
}

// ============================================================================
// Content Mappers
// ============================================================================

/// Post plus the derived fields shown alongside it
pub struct PostWithStats {
    pub post: Post,
    pub comment_count: i64,
    pub stats: Aggregate,
}

impl From<PostWithStats> for PostResponse {
    fn from(details: PostWithStats) -> Self {
        let PostWithStats {
            post,
            comment_count,
            stats,
        } = details;
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            body: post.body,
            created_at: post.created_at,
            modified_at: post.modified_at,
            comment_count,
            score: stats.score,
            reactions: stats.reaction_counts,
            viewer: stats.viewer.map(ViewerResponse::from),
        }
    }
}

pub struct CommentWithStats {
    pub comment: Comment,
    pub stats: Aggregate,
}

impl From<CommentWithStats> for CommentResponse {
    fn from(details: CommentWithStats) -> Self {
        let CommentWithStats { comment, stats } = details;
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            parent_id: comment.parent_id.map(|id| id.to_string()),
            author_id: comment.author_id.to_string(),
            body: comment.visible_body().to_string(),
            created_at: comment.created_at,
            modified_at: comment.modified_at,
            is_deleted: comment.is_deleted,
            score: stats.score,
            reactions: stats.reaction_counts,
            viewer: stats.viewer.map(ViewerResponse::from),
        }
    }
}
