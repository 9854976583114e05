//! Closed reaction vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// One of the ten reaction kinds a user can attach to a post or comment.
///
/// Variant order is the canonical display order; `Ord` follows it, so a
/// `BTreeMap<ReactionKind, _>` iterates in vocabulary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    Laugh,
    Heart,
    Neutral,
    Surprised,
    Fire,
    Poop,
    ThumbsUp,
    ThumbsDown,
    Angry,
    Monkey,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 10] = [
        Self::Laugh,
        Self::Heart,
        Self::Neutral,
        Self::Surprised,
        Self::Fire,
        Self::Poop,
        Self::ThumbsUp,
        Self::ThumbsDown,
        Self::Angry,
        Self::Monkey,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Laugh => "laugh",
            Self::Heart => "heart",
            Self::Neutral => "neutral",
            Self::Surprised => "surprised",
            Self::Fire => "fire",
            Self::Poop => "poop",
            Self::ThumbsUp => "thumbs_up",
            Self::ThumbsDown => "thumbs_down",
            Self::Angry => "angry",
            Self::Monkey => "monkey",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive: `"Laugh"` is not a reaction kind.
impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::InvalidReactionKind(s.to_string()))
    }
}
