//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities and aggregates to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreateCommentRequest, CreatePostRequest, ReactionRequest, VoteRequest};

pub use responses::{
    CommentResponse, HealthChecks, HealthResponse, PaginatedResponse, PaginationMeta,
    PostResponse, ReactionToggleResponse, ReadinessResponse, StatsResponse, ViewerResponse,
    VoteResponse,
};

pub use mappers::{CommentWithStats, PostWithStats};
