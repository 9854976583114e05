//! Post entity - a top-level piece of user content

use chrono::{DateTime, Utc};

use crate::value_objects::{ItemRef, Snowflake};

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post stamped with the current time
    pub fn new(id: Snowflake, author_id: Snowflake, body: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            body,
            created_at: now,
            modified_at: now,
        }
    }

    /// Interaction key for votes and reactions on this post
    #[inline]
    pub fn item_ref(&self) -> ItemRef {
        ItemRef::Post(self.id)
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }
}
