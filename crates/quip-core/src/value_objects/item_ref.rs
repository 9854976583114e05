//! Polymorphic reference to a votable/reactable content item

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Snowflake;
use crate::error::DomainError;

/// Kind of content item an interaction targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Post,
    Comment,
}

impl ItemKind {
    /// Storage and wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }

    /// Attach an id to this kind
    pub const fn item(self, id: Snowflake) -> ItemRef {
        match self {
            Self::Post => ItemRef::Post(id),
            Self::Comment => ItemRef::Comment(id),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(Self::Post),
            "comment" => Ok(Self::Comment),
            other => Err(DomainError::InvalidItemKind(other.to_string())),
        }
    }
}

/// A post or a comment, by id
///
/// Interactions are keyed by `(kind, id)`; keeping both halves in one sum
/// type means an interaction can never point at an unknown kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemRef {
    Post(Snowflake),
    Comment(Snowflake),
}

impl ItemRef {
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Post(_) => ItemKind::Post,
            Self::Comment(_) => ItemKind::Comment,
        }
    }

    pub const fn id(&self) -> Snowflake {
        match self {
            Self::Post(id) | Self::Comment(id) => *id,
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}
