//! Value objects - immutable types that represent domain concepts

mod item_ref;
mod listing;
mod reaction_kind;
mod snowflake;
mod vote_value;

pub use item_ref::{ItemKind, ItemRef};
pub use listing::{PageRequest, PostQuery, SortField, SortOrder};
pub use reaction_kind::ReactionKind;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError, MAX_WORKER_ID};
pub use vote_value::VoteValue;
