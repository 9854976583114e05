//! Entity to model mappers
//!
//! - `From<Model> for Entity`: rows whose columns are all plain values
//! - `TryFrom<Model>`: rows carrying vocabulary strings that must be parsed
//! - `*Insert` structs: entity data prepared for binding

mod content;
mod interaction;

pub use content::{CommentInsert, PostInsert};
pub(crate) use interaction::parse_vote_value;
pub use interaction::{ReactionInsert, VoteInsert};
