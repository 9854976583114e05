//! Vote and reaction handlers
//!
//! Posts and comments expose the same interaction endpoints; each pair of
//! handlers differs only in the item kind taken from the path.

use axum::{
    extract::{Path, State},
    Json,
};
use quip_core::{ItemRef, ReactionKind};
use quip_service::{
    InteractionService, ReactionRequest, ReactionToggleResponse, StatsResponse, VoteRequest,
    VoteResponse,
};

use crate::extractors::{
    AuthUser, CommentIdPath, CommentReactionPath, OptionalAuthUser, PostIdPath, PostReactionPath,
    ValidatedJson,
};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

// ============================================================================
// Votes
// ============================================================================

async fn apply_vote(
    state: &AppState,
    item: ItemRef,
    auth: OptionalAuthUser,
    request: VoteRequest,
) -> ApiResult<Json<StatsResponse>> {
    let service = InteractionService::new(state.service_context());
    let stats = service.apply_vote(item, &auth.caller(), request).await?;
    Ok(Json(stats))
}

async fn get_vote(state: &AppState, item: ItemRef, auth: AuthUser) -> ApiResult<Json<VoteResponse>> {
    let service = InteractionService::new(state.service_context());
    let vote = service.get_vote(item, &auth.caller()).await?;
    Ok(Json(vote))
}

/// PUT /posts/{post_id}/vote
pub async fn put_post_vote(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<VoteRequest>,
) -> ApiResult<Json<StatsResponse>> {
    apply_vote(&state, path.item()?, auth, request).await
}

/// PUT /comments/{comment_id}/vote
pub async fn put_comment_vote(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<CommentIdPath>,
    ValidatedJson(request): ValidatedJson<VoteRequest>,
) -> ApiResult<Json<StatsResponse>> {
    apply_vote(&state, path.item()?, auth, request).await
}

/// GET /posts/{post_id}/vote
pub async fn get_post_vote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<VoteResponse>> {
    get_vote(&state, path.item()?, auth).await
}

/// GET /comments/{comment_id}/vote
pub async fn get_comment_vote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
) -> ApiResult<Json<VoteResponse>> {
    get_vote(&state, path.item()?, auth).await
}

// ============================================================================
// Reactions
// ============================================================================

async fn toggle_reaction(
    state: &AppState,
    item: ItemRef,
    auth: OptionalAuthUser,
    request: ReactionRequest,
) -> ApiResult<Json<ReactionToggleResponse>> {
    let service = InteractionService::new(state.service_context());
    let toggled = service
        .toggle_reaction(item, &auth.caller(), request)
        .await?;
    Ok(Json(toggled))
}

async fn set_reaction(
    state: &AppState,
    item: ItemRef,
    kind: ReactionKind,
    auth: OptionalAuthUser,
    present: bool,
) -> ApiResult<NoContent> {
    let service = InteractionService::new(state.service_context());
    let caller = auth.caller();
    if present {
        service.add_reaction(item, &caller, kind).await?;
    } else {
        service.remove_reaction(item, &caller, kind).await?;
    }
    Ok(NoContent)
}

/// POST /posts/{post_id}/reactions
pub async fn toggle_post_reaction(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<ReactionRequest>,
) -> ApiResult<Json<ReactionToggleResponse>> {
    toggle_reaction(&state, path.item()?, auth, request).await
}

/// POST /comments/{comment_id}/reactions
pub async fn toggle_comment_reaction(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<CommentIdPath>,
    ValidatedJson(request): ValidatedJson<ReactionRequest>,
) -> ApiResult<Json<ReactionToggleResponse>> {
    toggle_reaction(&state, path.item()?, auth, request).await
}

/// PUT /posts/{post_id}/reactions/{kind}
pub async fn add_post_reaction(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<PostReactionPath>,
) -> ApiResult<NoContent> {
    set_reaction(&state, path.item()?, path.kind()?, auth, true).await
}

/// DELETE /posts/{post_id}/reactions/{kind}
pub async fn remove_post_reaction(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<PostReactionPath>,
) -> ApiResult<NoContent> {
    set_reaction(&state, path.item()?, path.kind()?, auth, false).await
}

/// PUT /comments/{comment_id}/reactions/{kind}
pub async fn add_comment_reaction(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<CommentReactionPath>,
) -> ApiResult<NoContent> {
    set_reaction(&state, path.item()?, path.kind()?, auth, true).await
}

/// DELETE /comments/{comment_id}/reactions/{kind}
pub async fn remove_comment_reaction(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<CommentReactionPath>,
) -> ApiResult<NoContent> {
    set_reaction(&state, path.item()?, path.kind()?, auth, false).await
}
