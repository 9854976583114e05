//! Batch loader for per-item social state
//!
//! Fetches grouped vote and reaction rows for a whole batch of items in a
//! fixed number of store round trips (two for anonymous readers, four with
//! a viewer) and folds them with [`quip_core::aggregate`].

use std::collections::HashMap;

use quip_core::{aggregate, Aggregate, InteractionRows, ItemKind, ItemRef, Snowflake, ViewerState};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct AggregateService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AggregateService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Aggregates for every id in `ids`, all of one kind
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn load(
        &self,
        kind: ItemKind,
        ids: &[Snowflake],
        viewer: Option<Snowflake>,
    ) -> ServiceResult<HashMap<Snowflake, Aggregate>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let votes = self.ctx.vote_repo();
        let reactions = self.ctx.reaction_repo();

        let (vote_tallies, reaction_tallies) =
            tokio::try_join!(votes.tally(kind, ids), reactions.tally(kind, ids))?;

        let mut rows = InteractionRows {
            votes: vote_tallies,
            reactions: reaction_tallies,
            ..InteractionRows::default()
        };

        if let Some(user_id) = viewer {
            let (viewer_votes, viewer_reactions) = tokio::try_join!(
                votes.find_for_user(kind, ids, user_id),
                reactions.find_for_user(kind, ids, user_id),
            )?;
            rows.viewer_votes = viewer_votes;
            rows.viewer_reactions = viewer_reactions;
        }

        Ok(aggregate(ids, rows, viewer.is_some()))
    }

    /// Aggregate of a single item
    pub async fn load_one(
        &self,
        item: ItemRef,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Aggregate> {
        let mut loaded = self.load(item.kind(), &[item.id()], viewer).await?;
        Ok(loaded
            .remove(&item.id())
            .unwrap_or_else(|| Self::empty(viewer.is_some())))
    }

    /// State of an item nobody has interacted with yet
    pub fn empty(viewer_present: bool) -> Aggregate {
        Aggregate {
            viewer: viewer_present.then(ViewerState::default),
            ..Aggregate::default()
        }
    }
}
