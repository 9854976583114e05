//! Interaction service
//!
//! Votes and reactions on posts and comments. Every write checks that the
//! target item exists first, since interaction rows carry no foreign key.

use quip_core::entities::{Reaction, Vote};
use quip_core::{require_authenticated, Caller, DomainError, ItemRef, ReactionKind, VoteValue};
use tracing::{info, instrument};

use crate::dto::{ReactionRequest, ReactionToggleResponse, StatsResponse, VoteRequest, VoteResponse};

use super::aggregate::AggregateService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Interaction service
pub struct InteractionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InteractionService<'a> {
    /// Create a new InteractionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Votes
    // ========================================================================

    /// Apply a wire vote: `plus`/`minus` set it, the empty value removes it
    #[instrument(skip(self, request))]
    pub async fn apply_vote(
        &self,
        item: ItemRef,
        caller: &Caller,
        request: VoteRequest,
    ) -> ServiceResult<StatsResponse> {
        require_authenticated(caller)?;

        match VoteValue::parse_wire(request.wire_value())? {
            Some(value) => self.set_vote(item, caller, value).await,
            None => self.remove_vote(item, caller).await,
        }
    }

    /// Upsert the caller's vote; repeating the same value changes nothing
    #[instrument(skip(self))]
    pub async fn set_vote(
        &self,
        item: ItemRef,
        caller: &Caller,
        value: VoteValue,
    ) -> ServiceResult<StatsResponse> {
        let user_id = require_authenticated(caller)?;
        self.ensure_exists(item).await?;

        self.ctx
            .vote_repo()
            .upsert(&Vote::new(item, user_id, value))
            .await?;

        info!(item = %item, user_id = %user_id, vote = %value, "Vote set");

        self.stats(item, caller).await
    }

    /// Remove the caller's vote; absence is not an error
    #[instrument(skip(self))]
    pub async fn remove_vote(&self, item: ItemRef, caller: &Caller) -> ServiceResult<StatsResponse> {
        let user_id = require_authenticated(caller)?;
        self.ensure_exists(item).await?;

        self.ctx.vote_repo().remove(item, user_id).await?;

        info!(item = %item, user_id = %user_id, "Vote removed");

        self.stats(item, caller).await
    }

    /// The caller's current vote on an item
    #[instrument(skip(self))]
    pub async fn get_vote(&self, item: ItemRef, caller: &Caller) -> ServiceResult<VoteResponse> {
        let user_id = require_authenticated(caller)?;
        self.ensure_exists(item).await?;

        let vote = self.ctx.vote_repo().find(item, user_id).await?;

        Ok(VoteResponse {
            item_kind: item.kind(),
            item_id: item.id().to_string(),
            vote,
        })
    }

    // ========================================================================
    // Reactions
    // ========================================================================

    /// Add a reaction; adding one the caller already holds is a no-op
    #[instrument(skip(self))]
    pub async fn add_reaction(
        &self,
        item: ItemRef,
        caller: &Caller,
        kind: ReactionKind,
    ) -> ServiceResult<()> {
        let user_id = require_authenticated(caller)?;
        self.ensure_exists(item).await?;

        self.ctx
            .reaction_repo()
            .add(&Reaction::new(item, user_id, kind))
            .await?;

        info!(item = %item, user_id = %user_id, kind = %kind, "Reaction added");
        Ok(())
    }

    /// Remove a reaction; removing an absent one is a no-op
    #[instrument(skip(self))]
    pub async fn remove_reaction(
        &self,
        item: ItemRef,
        caller: &Caller,
        kind: ReactionKind,
    ) -> ServiceResult<()> {
        let user_id = require_authenticated(caller)?;
        self.ensure_exists(item).await?;

        self.ctx.reaction_repo().remove(item, user_id, kind).await?;

        info!(item = %item, user_id = %user_id, kind = %kind, "Reaction removed");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn has_reaction(
        &self,
        item: ItemRef,
        caller: &Caller,
        kind: ReactionKind,
    ) -> ServiceResult<bool> {
        let user_id = require_authenticated(caller)?;
        Ok(self.ctx.reaction_repo().exists(item, user_id, kind).await?)
    }

    /// Flip one reaction of the caller.
    ///
    /// Reads the current state, then adds or removes. Two concurrent toggles
    /// can interleave, but add and remove are both idempotent, so the row
    /// always ends up either present or absent.
    #[instrument(skip(self, request))]
    pub async fn toggle_reaction(
        &self,
        item: ItemRef,
        caller: &Caller,
        request: ReactionRequest,
    ) -> ServiceResult<ReactionToggleResponse> {
        require_authenticated(caller)?;
        let kind: ReactionKind = request.kind.parse()?;

        let active = if self.has_reaction(item, caller, kind).await? {
            self.remove_reaction(item, caller, kind).await?;
            false
        } else {
            self.add_reaction(item, caller, kind).await?;
            true
        };

        Ok(ReactionToggleResponse {
            kind,
            active,
            stats: self.stats(item, caller).await?,
        })
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Aggregate of one item as the caller sees it
    #[instrument(skip(self))]
    pub async fn stats(&self, item: ItemRef, caller: &Caller) -> ServiceResult<StatsResponse> {
        let stats = AggregateService::new(self.ctx)
            .load_one(item, caller.viewer_id())
            .await?;
        Ok(StatsResponse::new(item, stats))
    }

    async fn ensure_exists(&self, item: ItemRef) -> ServiceResult<()> {
        let exists = match item {
            ItemRef::Post(id) => self.ctx.post_repo().exists(id).await?,
            ItemRef::Comment(id) => self.ctx.comment_repo().find_by_id(id).await?.is_some(),
        };

        if exists {
            Ok(())
        } else {
            Err(DomainError::item_not_found(item).into())
        }
    }
}
