//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quip_core::entities::Post;
use quip_core::traits::{PostRepository, RepoResult};
use quip_core::value_objects::{PostQuery, Snowflake, SortField};

use crate::mappers::PostInsert;
use crate::models::PostModel;

use super::error::map_db_error;

/// ORDER BY expression for a sort field.
///
/// Only these fixed fragments are ever interpolated into SQL.
fn order_expr(field: SortField) -> &'static str {
    match field {
        SortField::CreatedAt => "p.created_at",
        SortField::ModifiedAt => "p.modified_at",
        SortField::Id => "p.id",
        SortField::Score => {
            "COALESCE((SELECT SUM(CASE WHEN v.value = 'plus' THEN 1 ELSE -1 END) \
             FROM votes v WHERE v.item_kind = 'post' AND v.item_id = p.id), 0)"
        }
        SortField::ReactionCount => {
            "(SELECT COUNT(*) FROM reactions r WHERE r.item_kind = 'post' AND r.item_id = p.id)"
        }
        SortField::CommentCount => "(SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id)",
    }
}

fn list_sql(query: &PostQuery) -> String {
    format!(
        "SELECT p.id, p.author_id, p.body, p.created_at, p.modified_at \
         FROM posts p \
         ORDER BY {} {}, p.id ASC \
         LIMIT $1 OFFSET $2",
        order_expr(query.sort_field),
        query.sort_order.as_sql(),
    )
}

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r#"
            SELECT id, author_id, body, created_at, modified_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)
            "#,
        )
        .bind(id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &PostQuery) -> RepoResult<Vec<Post>> {
        let sql = list_sql(query);

        let results = sqlx::query_as::<_, PostModel>(&sql)
            .bind(query.page.limit())
            .bind(query.page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        let insert = PostInsert::new(post);

        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, body, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(insert.id)
        .bind(insert.author_id)
        .bind(insert.body)
        .bind(post.created_at)
        .bind(post.modified_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // Interaction rows have no foreign key; clear them in the same
        // transaction before the cascade removes the comments.
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for table in ["votes", "reactions"] {
            let sql = format!(
                "DELETE FROM {table} \
                 WHERE (item_kind = 'post' AND item_id = $1) \
                    OR (item_kind = 'comment' AND item_id IN \
                        (SELECT id FROM comments WHERE post_id = $1))"
            );
            sqlx::query(&sql)
                .bind(id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        sqlx::query(
            r#"
            DELETE FROM posts WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
