//! Axum extractors for request handling
//!
//! Custom extractors for caller identity, validation, listing parameters
//! and path ids.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use pagination::{ListPostsParams, ModerationPage, PageParams, PostListing};
pub use path::{CommentIdPath, CommentReactionPath, PostIdPath, PostReactionPath};
pub use validated::ValidatedJson;
