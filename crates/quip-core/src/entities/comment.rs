//! Comment entity - a reply attached to a post, optionally to another comment

use chrono::{DateTime, Utc};

use crate::value_objects::{ItemRef, Snowflake};

/// Comment entity
///
/// A soft-deleted comment keeps its row so replies stay anchored; only the
/// body is withheld from readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub parent_id: Option<Snowflake>,
    pub author_id: Snowflake,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl Comment {
    /// Create a new top-level comment
    pub fn new(id: Snowflake, post_id: Snowflake, author_id: Snowflake, body: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            post_id,
            parent_id: None,
            author_id,
            body,
            created_at: now,
            modified_at: now,
            is_deleted: false,
        }
    }

    /// Create a reply to `parent_id`
    pub fn new_reply(
        id: Snowflake,
        post_id: Snowflake,
        parent_id: Snowflake,
        author_id: Snowflake,
        body: String,
    ) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::new(id, post_id, author_id, body)
        }
    }

    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    #[inline]
    pub fn item_ref(&self) -> ItemRef {
        ItemRef::Comment(self.id)
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Body as readers see it: empty once deleted
    pub fn visible_body(&self) -> &str {
        if self.is_deleted {
            ""
        } else {
            &self.body
        }
    }

    /// Drop the stored body of a deleted comment before it leaves the domain
    pub fn redact(mut self) -> Self {
        if self.is_deleted {
            self.body.clear();
        }
        self
    }
}
