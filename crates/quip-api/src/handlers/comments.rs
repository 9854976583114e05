//! Comment handlers
//!
//! Endpoints for comment threads and single comments.

use axum::{
    extract::{Path, State},
    Json,
};
use quip_service::{CommentResponse, CommentService, CreateCommentRequest};

use crate::extractors::{CommentIdPath, OptionalAuthUser, PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Comments of a post in thread order
///
/// GET /posts/{post_id}/comments
pub async fn list_post_comments(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comments = service
        .list_for_post(path.post_id()?, &auth.caller())
        .await?;
    Ok(Json(comments))
}

/// Comment on a post
///
/// POST /posts/{post_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let comment = service
        .create_comment(path.post_id()?, &auth.caller(), request)
        .await?;
    Ok(Created(comment))
}

/// Get a comment
///
/// GET /comments/{comment_id}
pub async fn get_comment(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<CommentIdPath>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let comment = service
        .get_comment(path.comment_id()?, &auth.caller())
        .await?;
    Ok(Json(comment))
}

/// Soft-delete a comment (author or privileged caller)
///
/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<CommentIdPath>,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service
        .delete_comment(path.comment_id()?, &auth.caller())
        .await?;
    Ok(NoContent)
}
