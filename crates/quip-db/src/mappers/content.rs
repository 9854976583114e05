//! Post / Comment entity <-> model mappers

use quip_core::entities::{Comment, Post};
use quip_core::value_objects::Snowflake;

use crate::models::{CommentModel, PostModel};

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            body: model.body,
            created_at: model.created_at,
            modified_at: model.modified_at,
        }
    }
}

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            parent_id: model.parent_id.map(Snowflake::new),
            author_id: Snowflake::new(model.author_id),
            body: model.body,
            created_at: model.created_at,
            modified_at: model.modified_at,
            is_deleted: model.is_deleted,
        }
    }
}

/// Post values for database insertion
pub struct PostInsert<'a> {
    pub id: i64,
    pub author_id: i64,
    pub body: &'a str,
}

impl<'a> PostInsert<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            id: post.id.into_inner(),
            author_id: post.author_id.into_inner(),
            body: &post.body,
        }
    }
}

/// Comment values for database insertion
pub struct CommentInsert<'a> {
    pub id: i64,
    pub post_id: i64,
    pub parent_id: Option<i64>,
    pub author_id: i64,
    pub body: &'a str,
}

impl<'a> CommentInsert<'a> {
    pub fn new(comment: &'a Comment) -> Self {
        Self {
            id: comment.id.into_inner(),
            post_id: comment.post_id.into_inner(),
            parent_id: comment.parent_id.map(Snowflake::into_inner),
            author_id: comment.author_id.into_inner(),
            body: &comment.body,
        }
    }
}
