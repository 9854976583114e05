//! Vote and Reaction entities - per-user social signals on a content item

use chrono::{DateTime, Utc};

use crate::value_objects::{ItemRef, ReactionKind, Snowflake, VoteValue};

/// A user's single up/down vote on an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub item: ItemRef,
    pub user_id: Snowflake,
    pub value: VoteValue,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(item: ItemRef, user_id: Snowflake, value: VoteValue) -> Self {
        let now = Utc::now();
        Self {
            item,
            user_id,
            value,
            created_at: now,
            modified_at: now,
        }
    }
}

/// One reaction kind a user holds on an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub item: ItemRef,
    pub user_id: Snowflake,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(item: ItemRef, user_id: Snowflake, kind: ReactionKind) -> Self {
        Self {
            item,
            user_id,
            kind,
            created_at: Utc::now(),
        }
    }
}
