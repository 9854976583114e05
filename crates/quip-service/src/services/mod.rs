//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of a
//! request and orchestrates repositories around the pure domain rules.

pub mod aggregate;
pub mod comment;
pub mod context;
pub mod error;
pub mod interaction;
pub mod post;

pub use aggregate::AggregateService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use interaction::InteractionService;
pub use post::PostService;
