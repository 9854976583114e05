//! Aggregation of raw interaction rows into per-item social state
//!
//! The store hands back grouped rows (`item_id`, key, count); this module
//! folds them into one [`Aggregate`] per item. Nothing here is cached or
//! persisted: every read recomputes from the rows.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::value_objects::{ReactionKind, Snowflake, VoteValue};

/// Number of votes with one value on one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTally {
    pub item_id: Snowflake,
    pub value: VoteValue,
    pub count: i64,
}

/// Number of reactions of one kind on one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionTally {
    pub item_id: Snowflake,
    pub kind: ReactionKind,
    pub count: i64,
}

/// Everything the fold needs for one batch of items of a single kind
#[derive(Debug, Clone, Default)]
pub struct InteractionRows {
    pub votes: Vec<VoteTally>,
    pub reactions: Vec<ReactionTally>,
    pub viewer_votes: Vec<(Snowflake, VoteValue)>,
    pub viewer_reactions: Vec<(Snowflake, ReactionKind)>,
}

/// What a specific viewer has done to an item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerState {
    pub vote: Option<VoteValue>,
    pub reactions: BTreeSet<ReactionKind>,
}

/// Derived social state of one item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    /// plus count minus minus count
    pub score: i64,
    /// Only kinds with a non-zero count are present
    pub reaction_counts: BTreeMap<ReactionKind, i64>,
    /// `None` for anonymous readers
    pub viewer: Option<ViewerState>,
}

impl Aggregate {
    pub fn total_reactions(&self) -> i64 {
        self.reaction_counts.values().sum()
    }
}

/// Fold grouped rows into one aggregate per requested id.
///
/// Every id in `ids` gets an entry, even with no rows. When `viewer_present`
/// is set each entry carries a (possibly empty) [`ViewerState`]. Rows for ids
/// outside `ids` are ignored.
pub fn aggregate(
    ids: &[Snowflake],
    rows: InteractionRows,
    viewer_present: bool,
) -> HashMap<Snowflake, Aggregate> {
    let mut out: HashMap<Snowflake, Aggregate> = ids
        .iter()
        .map(|id| {
            let entry = Aggregate {
                viewer: viewer_present.then(ViewerState::default),
                ..Aggregate::default()
            };
            (*id, entry)
        })
        .collect();

    for tally in rows.votes {
        if let Some(entry) = out.get_mut(&tally.item_id) {
            entry.score += tally.value.weight() * tally.count;
        }
    }

    for tally in rows.reactions {
        if tally.count <= 0 {
            continue;
        }
        if let Some(entry) = out.get_mut(&tally.item_id) {
            *entry.reaction_counts.entry(tally.kind).or_insert(0) += tally.count;
        }
    }

    if viewer_present {
        for (item_id, value) in rows.viewer_votes {
            if let Some(viewer) = out.get_mut(&item_id).and_then(|e| e.viewer.as_mut()) {
                viewer.vote = Some(value);
            }
        }
        for (item_id, kind) in rows.viewer_reactions {
            if let Some(viewer) = out.get_mut(&item_id).and_then(|e| e.viewer.as_mut()) {
                viewer.reactions.insert(kind);
            }
        }
    }

    out
}
