//! Domain entities - core business objects

mod comment;
mod interaction;
mod post;

pub use comment::Comment;
pub use interaction::{Reaction, Vote};
pub use post::Post;
