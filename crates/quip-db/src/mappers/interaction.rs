//! Vote / Reaction mappers
//!
//! Vocabulary columns are guarded by CHECK constraints, so a value that
//! fails to parse means the schema and the code disagree.

use std::str::FromStr;

use quip_core::entities::{Reaction, Vote};
use quip_core::logic::{ReactionTally, VoteTally};
use quip_core::value_objects::{ReactionKind, Snowflake, VoteValue};
use quip_core::DomainError;

use crate::models::{ReactionTallyModel, UserReactionModel, UserVoteModel, VoteTallyModel};

fn parse_column<T>(column: &str, raw: &str) -> Result<T, DomainError>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse().map_err(|_| {
        DomainError::InternalError(format!("unexpected {column} value in store: {raw}"))
    })
}

impl TryFrom<VoteTallyModel> for VoteTally {
    type Error = DomainError;

    fn try_from(model: VoteTallyModel) -> Result<Self, Self::Error> {
        Ok(VoteTally {
            item_id: Snowflake::new(model.item_id),
            value: parse_column("vote", &model.value)?,
            count: model.count,
        })
    }
}

impl TryFrom<ReactionTallyModel> for ReactionTally {
    type Error = DomainError;

    fn try_from(model: ReactionTallyModel) -> Result<Self, Self::Error> {
        Ok(ReactionTally {
            item_id: Snowflake::new(model.item_id),
            kind: parse_column("reaction", &model.kind)?,
            count: model.count,
        })
    }
}

impl UserVoteModel {
    pub fn into_pair(self) -> Result<(Snowflake, VoteValue), DomainError> {
        Ok((Snowflake::new(self.item_id), parse_column("vote", &self.value)?))
    }
}

impl UserReactionModel {
    pub fn into_pair(self) -> Result<(Snowflake, ReactionKind), DomainError> {
        Ok((Snowflake::new(self.item_id), parse_column("reaction", &self.kind)?))
    }
}

pub(crate) fn parse_vote_value(raw: &str) -> Result<VoteValue, DomainError> {
    parse_column("vote", raw)
}

/// Vote values for an upsert
pub struct VoteInsert {
    pub item_kind: &'static str,
    pub item_id: i64,
    pub user_id: i64,
    pub value: &'static str,
}

impl VoteInsert {
    pub fn new(vote: &Vote) -> Self {
        Self {
            item_kind: vote.item.kind().as_str(),
            item_id: vote.item.id().into_inner(),
            user_id: vote.user_id.into_inner(),
            value: vote.value.as_str(),
        }
    }
}

/// Reaction values for an insert
pub struct ReactionInsert {
    pub item_kind: &'static str,
    pub item_id: i64,
    pub user_id: i64,
    pub kind: &'static str,
}

impl ReactionInsert {
    pub fn new(reaction: &Reaction) -> Self {
        Self {
            item_kind: reaction.item.kind().as_str(),
            item_id: reaction.item.id().into_inner(),
            user_id: reaction.user_id.into_inner(),
            kind: reaction.kind.as_str(),
        }
    }
}
