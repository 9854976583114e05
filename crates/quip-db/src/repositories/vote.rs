//! PostgreSQL implementation of VoteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quip_core::entities::Vote;
use quip_core::logic::VoteTally;
use quip_core::traits::{RepoResult, VoteRepository};
use quip_core::value_objects::{ItemKind, ItemRef, Snowflake, VoteValue};

use crate::mappers::{parse_vote_value, VoteInsert};
use crate::models::{UserVoteModel, VoteTallyModel, VoteValueModel};

use super::error::map_db_error;

/// PostgreSQL implementation of VoteRepository
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    /// Create a new PgVoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self, vote), fields(item = %vote.item, user_id = %vote.user_id))]
    async fn upsert(&self, vote: &Vote) -> RepoResult<()> {
        let insert = VoteInsert::new(vote);

        sqlx::query(
            r#"
            INSERT INTO votes (item_kind, item_id, user_id, value, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (item_kind, item_id, user_id)
            DO UPDATE SET value = EXCLUDED.value, modified_at = EXCLUDED.modified_at
            "#,
        )
        .bind(insert.item_kind)
        .bind(insert.item_id)
        .bind(insert.user_id)
        .bind(insert.value)
        .bind(vote.modified_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, item: ItemRef, user_id: Snowflake) -> RepoResult<()> {
        sqlx::query(
            r#"
            DELETE FROM votes WHERE item_kind = $1 AND item_id = $2 AND user_id = $3
            "#,
        )
        .bind(item.kind().as_str())
        .bind(item.id().into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find(&self, item: ItemRef, user_id: Snowflake) -> RepoResult<Option<VoteValue>> {
        let result = sqlx::query_as::<_, VoteValueModel>(
            r#"
            SELECT value
            FROM votes
            WHERE item_kind = $1 AND item_id = $2 AND user_id = $3
            "#,
        )
        .bind(item.kind().as_str())
        .bind(item.id().into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(|row| parse_vote_value(&row.value)).transpose()
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn tally(&self, kind: ItemKind, ids: &[Snowflake]) -> RepoResult<Vec<VoteTally>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, VoteTallyModel>(
            r#"
            SELECT item_id, value, COUNT(*) AS count
            FROM votes
            WHERE item_kind = $1 AND item_id = ANY($2)
            GROUP BY item_id, value
            "#,
        )
        .bind(kind.as_str())
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(VoteTally::try_from).collect()
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_for_user(
        &self,
        kind: ItemKind,
        ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<(Snowflake, VoteValue)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, UserVoteModel>(
            r#"
            SELECT item_id, value
            FROM votes
            WHERE item_kind = $1 AND item_id = ANY($2) AND user_id = $3
            "#,
        )
        .bind(kind.as_str())
        .bind(&ids)
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(UserVoteModel::into_pair).collect()
    }
}
