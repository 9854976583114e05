//! Path parameter extractors
//!
//! Ids arrive as decimal strings and are parsed into Snowflakes here, so a
//! malformed id is a 400 rather than a 404.

use quip_core::{ItemRef, ReactionKind, Snowflake};
use serde::Deserialize;

use crate::response::ApiError;

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Path parameters with post_id
#[derive(Debug, Deserialize)]
pub struct PostIdPath {
    pub post_id: String,
}

impl PostIdPath {
    /// Parse post_id as Snowflake
    pub fn post_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.post_id, "post_id")
    }

    pub fn item(&self) -> Result<ItemRef, ApiError> {
        self.post_id().map(ItemRef::Post)
    }
}

/// Path parameters with comment_id
#[derive(Debug, Deserialize)]
pub struct CommentIdPath {
    pub comment_id: String,
}

impl CommentIdPath {
    /// Parse comment_id as Snowflake
    pub fn comment_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.comment_id, "comment_id")
    }

    pub fn item(&self) -> Result<ItemRef, ApiError> {
        self.comment_id().map(ItemRef::Comment)
    }
}

/// Path parameters for an explicit reaction on a post
#[derive(Debug, Deserialize)]
pub struct PostReactionPath {
    pub post_id: String,
    pub kind: String,
}

impl PostReactionPath {
    pub fn item(&self) -> Result<ItemRef, ApiError> {
        parse_id(&self.post_id, "post_id").map(ItemRef::Post)
    }

    /// Reaction kind, validated against the vocabulary
    pub fn kind(&self) -> Result<ReactionKind, ApiError> {
        Ok(self.kind.parse()?)
    }
}

/// Path parameters for an explicit reaction on a comment
#[derive(Debug, Deserialize)]
pub struct CommentReactionPath {
    pub comment_id: String,
    pub kind: String,
}

impl CommentReactionPath {
    pub fn item(&self) -> Result<ItemRef, ApiError> {
        parse_id(&self.comment_id, "comment_id").map(ItemRef::Comment)
    }

    /// Reaction kind, validated against the vocabulary
    pub fn kind(&self) -> Result<ReactionKind, ApiError> {
        Ok(self.kind.parse()?)
    }
}
