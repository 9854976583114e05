//! Post service
//!
//! Handles post creation, lookup, listing and hard deletion.

use std::collections::HashMap;

use quip_core::entities::Post;
use quip_core::{
    authorize_delete, require_authenticated, validate_body, BodyKind, Caller, DomainError,
    ItemKind, PostQuery, Snowflake,
};
use tracing::{info, instrument, warn};

use crate::dto::{CreatePostRequest, PaginatedResponse, PostResponse, PostWithStats};

use super::aggregate::AggregateService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post authored by the caller
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        caller: &Caller,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let author_id = require_authenticated(caller)?;
        let body = validate_body(&request.body, BodyKind::Post)?;

        let post = Post::new(self.ctx.generate_id(), author_id, body);
        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, author_id = %author_id, "Post created");

        Ok(PostResponse::from(PostWithStats {
            post,
            comment_count: 0,
            stats: AggregateService::empty(true),
        }))
    }

    /// Get a single post with its aggregate for the caller
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: Snowflake, caller: &Caller) -> ServiceResult<PostResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        self.present(vec![post], caller)
            .await?
            .pop()
            .ok_or_else(|| ServiceError::internal("post view missing after load"))
    }

    /// List posts; the query has already been normalized to valid values
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        query: PostQuery,
        caller: &Caller,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        let posts = self.ctx.post_repo().list(&query).await?;
        let data = self.present(posts, caller).await?;

        Ok(PaginatedResponse::new(
            data,
            query.page.page(),
            query.page.page_size(),
        ))
    }

    /// Hard-delete a post together with its comments and interactions
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: Snowflake, caller: &Caller) -> ServiceResult<()> {
        let user_id = require_authenticated(caller)?;

        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        if let Err(e) = authorize_delete(caller, post.item_ref(), post.author_id) {
            warn!(post_id = %post_id, user_id = %user_id, "Post delete rejected");
            return Err(e.into());
        }

        self.ctx.post_repo().delete(post_id).await?;

        info!(
            post_id = %post_id,
            deleted_by = %user_id,
            moderated = !post.is_authored_by(user_id),
            "Post deleted"
        );

        Ok(())
    }

    /// Attach comment counts and aggregates to a batch of posts
    async fn present(&self, posts: Vec<Post>, caller: &Caller) -> ServiceResult<Vec<PostResponse>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Snowflake> = posts.iter().map(|post| post.id).collect();
        let viewer = caller.viewer_id();
        let aggregates = AggregateService::new(self.ctx);

        let (counts, mut stats) = tokio::try_join!(
            async {
                self.ctx
                    .comment_repo()
                    .count_by_posts(&ids)
                    .await
                    .map_err(ServiceError::from)
            },
            aggregates.load(ItemKind::Post, &ids, viewer),
        )?;
        let counts: HashMap<Snowflake, i64> = counts.into_iter().collect();

        Ok(posts
            .into_iter()
            .map(|post| {
                let comment_count = counts.get(&post.id).copied().unwrap_or(0);
                let stats = stats
                    .remove(&post.id)
                    .unwrap_or_else(|| AggregateService::empty(viewer.is_some()));
                PostResponse::from(PostWithStats {
                    post,
                    comment_count,
                    stats,
                })
            })
            .collect())
    }
}
