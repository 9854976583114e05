//! Vote and reaction query models
//!
//! Interaction rows are only ever read back grouped or filtered to one
//! user, so there is no full-row model.

use sqlx::FromRow;

/// Grouped vote count (from query)
#[derive(Debug, Clone, FromRow)]
pub struct VoteTallyModel {
    pub item_id: i64,
    pub value: String,
    pub count: i64,
}

/// Grouped reaction count (from query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionTallyModel {
    pub item_id: i64,
    pub kind: String,
    pub count: i64,
}

/// A single vote value
#[derive(Debug, Clone, FromRow)]
pub struct VoteValueModel {
    pub value: String,
}

/// One user's vote on one item of a batch
#[derive(Debug, Clone, FromRow)]
pub struct UserVoteModel {
    pub item_id: i64,
    pub value: String,
}

/// One user's reaction on one item of a batch
#[derive(Debug, Clone, FromRow)]
pub struct UserReactionModel {
    pub item_id: i64,
    pub kind: String,
}
