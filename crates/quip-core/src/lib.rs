//! # quip-core
//!
//! Domain layer for the quip content service: posts, threaded comments,
//! votes and reactions, plus the pure rules that sit on top of them
//! (aggregation, thread ordering, delete authorization, content safety).
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod logic;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Comment, Post, Reaction, Vote};
pub use error::DomainError;
pub use logic::{
    aggregate, assemble_thread, authorize_delete, can_delete, require_authenticated,
    require_privileged, root_of, validate_body, Aggregate, BodyKind, Caller, InteractionRows,
    ReactionTally, ViewerState, VoteTally,
};
pub use traits::{
    CommentRepository, PostRepository, ReactionRepository, RepoResult, VoteRepository,
};
pub use value_objects::{
    ItemKind, ItemRef, PageRequest, PostQuery, ReactionKind, Snowflake, SnowflakeGenerator,
    SnowflakeParseError, SortField, SortOrder, VoteValue,
};
