//! Post handlers
//!
//! Endpoints for listing, creating, reading and deleting posts.

use axum::{
    extract::{Path, State},
    Json,
};
use quip_service::{CreatePostRequest, PaginatedResponse, PostResponse, PostService};

use crate::extractors::{OptionalAuthUser, PostIdPath, PostListing, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List posts
///
/// GET /posts?page&page_size&sort_field&sort_order
pub async fn list_posts(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    PostListing(query): PostListing,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let posts = service.list_posts(query, &auth.caller()).await?;
    Ok(Json(posts))
}

/// Create a post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.create_post(&auth.caller(), request).await?;
    Ok(Created(post))
}

/// Get a post
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.get_post(path.post_id()?, &auth.caller()).await?;
    Ok(Json(post))
}

/// Delete a post (author or privileged caller)
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<NoContent> {
    let service = PostService::new(state.service_context());
    service.delete_post(path.post_id()?, &auth.caller()).await?;
    Ok(NoContent)
}
