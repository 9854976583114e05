//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CommentRepository, PostRepository, ReactionRepository, RepoResult, VoteRepository,
};
