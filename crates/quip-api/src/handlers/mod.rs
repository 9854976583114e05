//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod comments;
pub mod health;
pub mod interactions;
pub mod moderation;
pub mod posts;
