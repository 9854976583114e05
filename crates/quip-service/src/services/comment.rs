//! Comment service
//!
//! Handles threaded comments: creation, thread reads, soft deletion and the
//! moderation feed of recent comments.

use quip_core::entities::Comment;
use quip_core::{
    assemble_thread, authorize_delete, require_authenticated, require_privileged, validate_body,
    BodyKind, Caller, DomainError, ItemKind, PageRequest, Snowflake,
};
use tracing::{info, instrument, warn};

use crate::dto::{CommentResponse, CommentWithStats, CreateCommentRequest, PaginatedResponse};

use super::aggregate::AggregateService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a comment on a post, optionally as a reply.
    ///
    /// The store rejects a missing post or a parent that lives on another
    /// post; replying to a soft-deleted comment is allowed.
    #[instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        post_id: Snowflake,
        caller: &Caller,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let author_id = require_authenticated(caller)?;
        let body = validate_body(&request.body, BodyKind::Comment)?;

        let id = self.ctx.generate_id();
        let comment = match request.parent_id {
            Some(parent_id) => Comment::new_reply(id, post_id, parent_id, author_id, body),
            None => Comment::new(id, post_id, author_id, body),
        };

        self.ctx.comment_repo().create(&comment).await?;

        info!(
            comment_id = %comment.id,
            post_id = %post_id,
            author_id = %author_id,
            reply = comment.is_reply(),
            "Comment created"
        );

        Ok(CommentResponse::from(CommentWithStats {
            comment,
            stats: AggregateService::empty(true),
        }))
    }

    /// All comments of a post in thread order
    #[instrument(skip(self))]
    pub async fn list_for_post(
        &self,
        post_id: Snowflake,
        caller: &Caller,
    ) -> ServiceResult<Vec<CommentResponse>> {
        if !self.ctx.post_repo().exists(post_id).await? {
            return Err(DomainError::PostNotFound(post_id).into());
        }

        let comments = self.ctx.comment_repo().find_by_post(post_id).await?;
        self.present(assemble_thread(comments), caller).await
    }

    /// Get a single comment
    #[instrument(skip(self))]
    pub async fn get_comment(
        &self,
        comment_id: Snowflake,
        caller: &Caller,
    ) -> ServiceResult<CommentResponse> {
        let comment = self.find(comment_id).await?;

        self.present(vec![comment], caller)
            .await?
            .pop()
            .ok_or_else(|| ServiceError::internal("comment view missing after load"))
    }

    /// Soft-delete a comment; the row stays so replies keep their anchor
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, comment_id: Snowflake, caller: &Caller) -> ServiceResult<()> {
        let user_id = require_authenticated(caller)?;
        let comment = self.find(comment_id).await?;

        if let Err(e) = authorize_delete(caller, comment.item_ref(), comment.author_id) {
            warn!(comment_id = %comment_id, user_id = %user_id, "Comment delete rejected");
            return Err(e.into());
        }

        self.ctx.comment_repo().soft_delete(comment_id).await?;

        info!(
            comment_id = %comment_id,
            post_id = %comment.post_id,
            deleted_by = %user_id,
            moderated = !comment.is_authored_by(user_id),
            "Comment deleted"
        );

        Ok(())
    }

    /// Most recent comments across all posts, for privileged callers
    #[instrument(skip(self))]
    pub async fn list_recent(
        &self,
        page: PageRequest,
        caller: &Caller,
    ) -> ServiceResult<PaginatedResponse<CommentResponse>> {
        if let Err(e) = require_privileged(caller) {
            if caller.viewer_id().is_some() {
                warn!(user_id = ?caller.user_id, "Moderation list rejected");
            }
            return Err(e.into());
        }

        let comments = self.ctx.comment_repo().list_recent(page).await?;
        let data = self.present(comments, caller).await?;

        Ok(PaginatedResponse::new(data, page.page(), page.page_size()))
    }

    async fn find(&self, comment_id: Snowflake) -> ServiceResult<Comment> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;
        Ok(comment)
    }

    /// Attach aggregates, keeping the input order
    async fn present(
        &self,
        comments: Vec<Comment>,
        caller: &Caller,
    ) -> ServiceResult<Vec<CommentResponse>> {
        if comments.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Snowflake> = comments.iter().map(|comment| comment.id).collect();
        let viewer = caller.viewer_id();
        let mut stats = AggregateService::new(self.ctx)
            .load(ItemKind::Comment, &ids, viewer)
            .await?;

        Ok(comments
            .into_iter()
            .map(|comment| {
                let stats = stats
                    .remove(&comment.id)
                    .unwrap_or_else(|| AggregateService::empty(viewer.is_some()));
                CommentResponse::from(CommentWithStats {
                    comment: comment.redact(),
                    stats,
                })
            })
            .collect())
    }
}
