//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quip_core::entities::Reaction;
use quip_core::logic::ReactionTally;
use quip_core::traits::{ReactionRepository, RepoResult};
use quip_core::value_objects::{ItemKind, ItemRef, ReactionKind, Snowflake};

use crate::mappers::ReactionInsert;
use crate::models::{ReactionTallyModel, UserReactionModel};

use super::error::map_db_error;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self, reaction), fields(item = %reaction.item, kind = %reaction.kind))]
    async fn add(&self, reaction: &Reaction) -> RepoResult<()> {
        let insert = ReactionInsert::new(reaction);

        sqlx::query(
            r#"
            INSERT INTO reactions (item_kind, item_id, user_id, kind, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (item_kind, item_id, user_id, kind) DO NOTHING
            "#,
        )
        .bind(insert.item_kind)
        .bind(insert.item_id)
        .bind(insert.user_id)
        .bind(insert.kind)
        .bind(reaction.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(
        &self,
        item: ItemRef,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            DELETE FROM reactions
            WHERE item_kind = $1 AND item_id = $2 AND user_id = $3 AND kind = $4
            "#,
        )
        .bind(item.kind().as_str())
        .bind(item.id().into_inner())
        .bind(user_id.into_inner())
        .bind(kind.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn exists(
        &self,
        item: ItemRef,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reactions
                WHERE item_kind = $1 AND item_id = $2 AND user_id = $3 AND kind = $4
            )
            "#,
        )
        .bind(item.kind().as_str())
        .bind(item.id().into_inner())
        .bind(user_id.into_inner())
        .bind(kind.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn tally(&self, kind: ItemKind, ids: &[Snowflake]) -> RepoResult<Vec<ReactionTally>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, ReactionTallyModel>(
            r#"
            SELECT item_id, kind, COUNT(*) AS count
            FROM reactions
            WHERE item_kind = $1 AND item_id = ANY($2)
            GROUP BY item_id, kind
            "#,
        )
        .bind(kind.as_str())
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(ReactionTally::try_from).collect()
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_for_user(
        &self,
        kind: ItemKind,
        ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<(Snowflake, ReactionKind)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, UserReactionModel>(
            r#"
            SELECT item_id, kind
            FROM reactions
            WHERE item_kind = $1 AND item_id = ANY($2) AND user_id = $3
            "#,
        )
        .bind(kind.as_str())
        .bind(&ids)
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(UserReactionModel::into_pair).collect()
    }
}
