//! Caller identity carried by bearer tokens

mod jwt;

pub use jwt::{Claims, JwtService};
