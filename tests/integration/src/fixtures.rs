//! Test fixtures: wire-side request and response shapes
//!
//! These mirror the JSON the API speaks rather than reusing the service DTOs,
//! so the tests pin the wire format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Create post request
#[derive(Debug, Serialize)]
pub struct NewPost {
    pub body: String,
}

impl NewPost {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
        }
    }
}

/// Create comment request
#[derive(Debug, Serialize)]
pub struct NewComment {
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl NewComment {
    pub fn root(body: &str) -> Self {
        Self {
            body: body.to_string(),
            parent_id: None,
        }
    }

    pub fn reply(body: &str, parent_id: &str) -> Self {
        Self {
            body: body.to_string(),
            parent_id: Some(parent_id.to_string()),
        }
    }
}

/// Vote request; `""` removes the vote
#[derive(Debug, Serialize)]
pub struct CastVote {
    pub vote: String,
}

impl CastVote {
    pub fn new(vote: &str) -> Self {
        Self {
            vote: vote.to_string(),
        }
    }
}

/// Reaction toggle request
#[derive(Debug, Serialize)]
pub struct ToggleReaction {
    pub kind: String,
}

impl ToggleReaction {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct ViewerView {
    pub vote: Option<String>,
    pub reactions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostView {
    pub id: String,
    pub author_id: String,
    pub body: String,
    pub comment_count: i64,
    pub score: i64,
    pub reactions: BTreeMap<String, i64>,
    pub viewer: Option<ViewerView>,
}

#[derive(Debug, Deserialize)]
pub struct CommentView {
    pub id: String,
    pub post_id: String,
    pub parent_id: Option<String>,
    pub author_id: String,
    pub body: String,
    pub is_deleted: bool,
    pub score: i64,
    pub reactions: BTreeMap<String, i64>,
    pub viewer: Option<ViewerView>,
}

#[derive(Debug, Deserialize)]
pub struct StatsView {
    pub item_kind: String,
    pub item_id: String,
    pub score: i64,
    pub reactions: BTreeMap<String, i64>,
    pub viewer: Option<ViewerView>,
}

#[derive(Debug, Deserialize)]
pub struct VoteView {
    pub item_kind: String,
    pub item_id: String,
    pub vote: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleView {
    pub kind: String,
    pub active: bool,
    pub stats: StatsView,
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub page: i64,
    pub page_size: i64,
    pub count: usize,
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}
