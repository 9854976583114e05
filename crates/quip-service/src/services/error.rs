//! Errors returned by the services
//!
//! Almost everything a service rejects is a [`DomainError`]; the other
//! variants cover token failures bubbling up from `quip-common` and
//! wiring mistakes caught while building the context.

use std::fmt;

use quip_common::{domain_status, AppError};
use quip_core::DomainError;

#[derive(Debug)]
pub enum ServiceError {
    Domain(DomainError),

    App(AppError),

    /// `ServiceContextBuilder::build` was called without a required part
    MissingDependency(&'static str),

    /// A result the service itself should have produced went missing
    Internal(String),
}

impl ServiceError {
    pub fn missing(part: &'static str) -> Self {
        Self::MissingDependency(part)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::MissingDependency(_) | Self::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::MissingDependency(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The domain failure behind this error, looking through `App`
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) | Self::App(AppError::Domain(e)) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => e.fmt(f),
            Self::App(e) => e.fmt(f),
            Self::MissingDependency(part) => write!(f, "{part} is required"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => Self::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::MissingDependency(part) => Self::Config(format!("{part} is required")),
            ServiceError::Internal(msg) => Self::internal(anyhow::anyhow!(msg)),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
