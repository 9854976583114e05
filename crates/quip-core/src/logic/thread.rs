//! Thread assembly: flatten one post's comments into render order
//!
//! Comments are grouped under their root ancestor. Groups come in ascending
//! root id order; inside a group the root itself leads and the replies follow
//! oldest first.

use std::collections::{HashMap, HashSet};

use crate::entities::Comment;
use crate::value_objects::Snowflake;

/// Resolve the top-most ancestor of `comment` by walking its parent chain.
///
/// If the chain reaches a parent that is not in `by_id`, that missing
/// parent's id is the root. A cycle stops the walk at the first repeated id.
pub fn root_of<'a>(comment: &'a Comment, by_id: &HashMap<Snowflake, &'a Comment>) -> Snowflake {
    let mut current = comment;
    let mut seen = HashSet::new();
    seen.insert(current.id);

    while let Some(parent_id) = current.parent_id {
        match by_id.get(&parent_id) {
            Some(parent) if seen.insert(parent.id) => current = *parent,
            _ => return parent_id,
        }
    }

    current.id
}

/// Order a flat set of comments belonging to one post.
///
/// Soft-deleted comments keep their position.
pub fn assemble_thread(comments: Vec<Comment>) -> Vec<Comment> {
    let roots: HashMap<Snowflake, Snowflake> = {
        let by_id: HashMap<Snowflake, &Comment> = comments.iter().map(|c| (c.id, c)).collect();
        comments
            .iter()
            .map(|c| (c.id, root_of(c, &by_id)))
            .collect()
    };

    let mut ordered = comments;
    ordered.sort_by_key(|c| {
        let root = roots[&c.id];
        (root, c.id != root, c.created_at, c.id)
    });
    ordered
}
