//! Authorization policy for content mutation

use crate::error::DomainError;
use crate::value_objects::{ItemRef, Snowflake};

/// Identity of whoever is making the current request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caller {
    pub user_id: Option<Snowflake>,
    pub is_privileged: bool,
}

impl Caller {
    pub const fn anonymous() -> Self {
        Self {
            user_id: None,
            is_privileged: false,
        }
    }

    pub const fn user(user_id: Snowflake) -> Self {
        Self {
            user_id: Some(user_id),
            is_privileged: false,
        }
    }

    pub const fn privileged(user_id: Snowflake) -> Self {
        Self {
            user_id: Some(user_id),
            is_privileged: true,
        }
    }

    /// Viewer id for aggregation; id zero counts as anonymous
    pub fn viewer_id(&self) -> Option<Snowflake> {
        self.user_id.filter(|id| !id.is_zero())
    }
}

/// Reject anonymous callers before any store write
pub fn require_authenticated(caller: &Caller) -> Result<Snowflake, DomainError> {
    caller.viewer_id().ok_or(DomainError::Unauthenticated)
}

/// Authors may delete their own content; privileged callers may delete anything
pub fn can_delete(caller: &Caller, author_id: Snowflake) -> bool {
    caller.is_privileged || caller.viewer_id() == Some(author_id)
}

/// Gate a delete of `item`, returning the error that matches its kind
pub fn authorize_delete(
    caller: &Caller,
    item: ItemRef,
    author_id: Snowflake,
) -> Result<(), DomainError> {
    require_authenticated(caller)?;
    if can_delete(caller, author_id) {
        return Ok(());
    }
    Err(match item {
        ItemRef::Post(_) => DomainError::NotPostAuthor,
        ItemRef::Comment(_) => DomainError::NotCommentAuthor,
    })
}

pub fn require_privileged(caller: &Caller) -> Result<Snowflake, DomainError> {
    let user_id = require_authenticated(caller)?;
    if !caller.is_privileged {
        return Err(DomainError::PrivilegeRequired);
    }
    Ok(user_id)
}
