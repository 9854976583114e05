//! Moderation handlers

use axum::{extract::State, Json};
use quip_service::{CommentResponse, CommentService, PaginatedResponse};

use crate::extractors::{ModerationPage, OptionalAuthUser};
use crate::response::ApiResult;
use crate::state::AppState;

/// Most recent comments across all posts, deleted ones included
///
/// GET /moderation/comments?page&page_size
pub async fn list_recent_comments(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ModerationPage(page): ModerationPage,
) -> ApiResult<Json<PaginatedResponse<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comments = service.list_recent(page, &auth.caller()).await?;
    Ok(Json(comments))
}
