//! Errors raised outside the domain model
//!
//! Token checks, configuration and infrastructure failures live here;
//! [`DomainError`]s pass through unchanged so their codes survive every
//! layer up to the HTTP response.

use quip_core::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Pool creation or migrations failed
    #[error("Database unavailable: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidToken | Self::TokenExpired => 401,
            Self::Database(_) => 503,
            Self::Config(_) | Self::Internal(_) => 500,
            Self::Domain(e) => domain_status(e),
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Database(_) => "STORE_UNAVAILABLE",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }
}

/// HTTP status for a domain error, picked by its taxonomy class.
///
/// The classes are checked from most to least specific; anything that
/// falls through is an internal error.
#[must_use]
pub fn domain_status(e: &DomainError) -> u16 {
    let classes: [(fn(&DomainError) -> bool, u16); 6] = [
        (DomainError::is_validation, 400),
        (DomainError::is_unauthenticated, 401),
        (DomainError::is_authorization, 403),
        (DomainError::is_not_found, 404),
        (DomainError::is_conflict, 409),
        (DomainError::is_unavailable, 503),
    ];

    classes
        .iter()
        .find(|(matches, _)| matches(e))
        .map_or(500, |&(_, status)| status)
}
