//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in quip-core.
//! Posts and comments form the Content Store; votes and reactions the
//! Interaction Store.

mod comment;
mod error;
mod post;
mod reaction;
mod vote;

pub use comment::PgCommentRepository;
pub use post::PgPostRepository;
pub use reaction::PgReactionRepository;
pub use vote::PgVoteRepository;
