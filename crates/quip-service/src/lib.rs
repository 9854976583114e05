//! # quip-service
//!
//! Application layer containing the content and interaction use cases and
//! their DTOs. Services enforce the authorization policy before any store
//! write and fold interaction rows into read models on the way out.

pub mod dto;
pub mod services;

pub use dto::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, HealthChecks, HealthResponse,
    PaginatedResponse, PaginationMeta, PostResponse, ReactionRequest, ReactionToggleResponse,
    ReadinessResponse, StatsResponse, ViewerResponse, VoteRequest, VoteResponse,
};
pub use services::{
    AggregateService, CommentService, InteractionService, PostService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
