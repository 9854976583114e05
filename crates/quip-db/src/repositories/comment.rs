//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quip_core::entities::Comment;
use quip_core::error::DomainError;
use quip_core::traits::{CommentRepository, RepoResult};
use quip_core::value_objects::{PageRequest, Snowflake};

use crate::mappers::CommentInsert;
use crate::models::{CommentCountModel, CommentModel};

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, post_id, parent_id, author_id, body, created_at, modified_at, is_deleted
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let results = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, post_id, parent_id, author_id, body, created_at, modified_at, is_deleted
            FROM comments
            WHERE post_id = $1
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id, post_id = %comment.post_id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let insert = CommentInsert::new(comment);

        // The parent check rides along with the insert so a parent on a
        // different post is rejected atomically.
        let result = sqlx::query(
            r#"
            INSERT INTO comments
                (id, post_id, parent_id, author_id, body, created_at, modified_at, is_deleted)
            SELECT $1, $2, $3, $4, $5, $6, $7, FALSE
            WHERE $3::BIGINT IS NULL
               OR EXISTS (SELECT 1 FROM comments WHERE id = $3 AND post_id = $2)
            "#,
        )
        .bind(insert.id)
        .bind(insert.post_id)
        .bind(insert.parent_id)
        .bind(insert.author_id)
        .bind(insert.body)
        .bind(comment.created_at)
        .bind(comment.modified_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, |constraint| match (constraint, comment.parent_id) {
                (Some(name), Some(parent_id)) if name.contains("parent") => {
                    DomainError::ParentCommentNotFound(parent_id)
                }
                _ => DomainError::PostNotFound(comment.post_id),
            })
        })?;

        if result.rows_affected() == 0 {
            let post_exists = sqlx::query_scalar::<_, bool>(
                r#"
                SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)
                "#,
            )
            .bind(insert.post_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

            return Err(match comment.parent_id {
                Some(parent_id) if post_exists => DomainError::ParentCommentNotFound(parent_id),
                _ => DomainError::PostNotFound(comment.post_id),
            });
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET is_deleted = TRUE, modified_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CommentNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_posts(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, i64)>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = post_ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, CommentCountModel>(
            r#"
            SELECT post_id, COUNT(*) AS count
            FROM comments
            WHERE post_id = ANY($1)
            GROUP BY post_id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .map(|r| (Snowflake::new(r.post_id), r.count))
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_recent(&self, page: PageRequest) -> RepoResult<Vec<Comment>> {
        let results = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, post_id, parent_id, author_id, body, created_at, modified_at, is_deleted
            FROM comments
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }
}
