//! Database models - SQLx-compatible structs for PostgreSQL tables

mod content;
mod interaction;

pub use content::{CommentCountModel, CommentModel, PostModel};
pub use interaction::{
    ReactionTallyModel, UserReactionModel, UserVoteModel, VoteTallyModel, VoteValueModel,
};
