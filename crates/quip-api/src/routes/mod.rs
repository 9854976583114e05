//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{comments, health, interactions, moderation, posts};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes, kept outside the rate limiter
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(post_routes())
        .merge(comment_routes())
        .merge(moderation_routes())
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/:post_id",
            get(posts::get_post).delete(posts::delete_post),
        )
        .route(
            "/posts/:post_id/comments",
            get(comments::list_post_comments).post(comments::create_comment),
        )
        .route(
            "/posts/:post_id/vote",
            put(interactions::put_post_vote).get(interactions::get_post_vote),
        )
        .route(
            "/posts/:post_id/reactions",
            post(interactions::toggle_post_reaction),
        )
        .route(
            "/posts/:post_id/reactions/:kind",
            put(interactions::add_post_reaction).delete(interactions::remove_post_reaction),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/comments/:comment_id",
            get(comments::get_comment).delete(comments::delete_comment),
        )
        .route(
            "/comments/:comment_id/vote",
            put(interactions::put_comment_vote).get(interactions::get_comment_vote),
        )
        .route(
            "/comments/:comment_id/reactions",
            post(interactions::toggle_comment_reaction),
        )
        .route(
            "/comments/:comment_id/reactions/:kind",
            put(interactions::add_comment_reaction).delete(interactions::remove_comment_reaction),
        )
}

fn moderation_routes() -> Router<AppState> {
    Router::new().route(
        "/moderation/comments",
        get(moderation::list_recent_comments),
    )
}
