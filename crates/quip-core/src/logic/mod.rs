//! Pure domain rules: aggregation, thread ordering, authorization and
//! content safety. Nothing in here touches a store.

mod aggregator;
mod content;
mod policy;
mod thread;

pub use aggregator::{aggregate, Aggregate, InteractionRows, ReactionTally, ViewerState, VoteTally};
pub use content::{validate_body, BodyKind, MAX_BODY_CHARS};
pub use policy::{authorize_delete, can_delete, require_authenticated, require_privileged, Caller};
pub use thread::{assemble_thread, root_of};
