//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use quip_core::{ItemKind, ReactionKind, VoteValue};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Offset-paginated listing
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: i64, page_size: i64) -> Self {
        let count = data.len();
        Self {
            data,
            pagination: PaginationMeta {
                page,
                page_size,
                count,
                has_more: i64::try_from(count).is_ok_and(|n| n == page_size),
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub page_size: i64,
    /// Items on this page
    pub count: usize,
    /// A full page suggests another one may follow
    pub has_more: bool,
}

// ============================================================================
// Interaction Responses
// ============================================================================

/// What the requesting viewer has done to an item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewerResponse {
    pub vote: Option<VoteValue>,
    /// Vocabulary order
    pub reactions: Vec<ReactionKind>,
}

/// Refreshed aggregate of one item, returned after an interaction write
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub item_kind: ItemKind,
    pub item_id: String,
    pub score: i64,
    pub reactions: BTreeMap<ReactionKind, i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer: Option<ViewerResponse>,
}

/// The caller's current vote on an item
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub item_kind: ItemKind,
    pub item_id: String,
    pub vote: Option<VoteValue>,
}

/// Outcome of a reaction toggle
#[derive(Debug, Clone, Serialize)]
pub struct ReactionToggleResponse {
    pub kind: ReactionKind,
    /// `true` when the reaction was added, `false` when it was removed
    pub active: bool,
    pub stats: StatsResponse,
}

// ============================================================================
// Content Responses
// ============================================================================

/// Post with its comment count and aggregate
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub comment_count: i64,
    pub score: i64,
    pub reactions: BTreeMap<ReactionKind, i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer: Option<ViewerResponse>,
}

/// Comment with its aggregate; deleted comments carry an empty body
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub parent_id: Option<String>,
    pub author_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub score: i64,
    pub reactions: BTreeMap<ReactionKind, i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer: Option<ViewerResponse>,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
