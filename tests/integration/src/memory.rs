//! In-memory repository implementations
//!
//! One [`MemoryStore`] backs all four repository traits so that cascades and
//! cross-table checks behave like the PostgreSQL adapters. State sits behind
//! a single `parking_lot::RwLock`; every trait method takes the lock once,
//! which makes each call atomic in the same way a single SQL statement is.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use quip_core::{
    Comment, CommentRepository, DomainError, ItemKind, ItemRef, PageRequest, Post, PostQuery,
    PostRepository, Reaction, ReactionKind, ReactionRepository, ReactionTally, RepoResult,
    Snowflake, SortField, SortOrder, Vote, VoteRepository, VoteTally, VoteValue,
};

#[derive(Debug, Default)]
struct StoreState {
    posts: BTreeMap<Snowflake, Post>,
    comments: BTreeMap<Snowflake, Comment>,
    votes: BTreeMap<(ItemRef, Snowflake), Vote>,
    reactions: BTreeMap<(ItemRef, Snowflake, ReactionKind), Reaction>,
}

impl StoreState {
    fn score(&self, item: ItemRef) -> i64 {
        self.votes
            .values()
            .filter(|vote| vote.item == item)
            .map(|vote| vote.value.weight())
            .sum()
    }

    fn reaction_count(&self, item: ItemRef) -> i64 {
        self.reactions.keys().filter(|(i, _, _)| *i == item).count() as i64
    }

    fn comment_count(&self, post_id: Snowflake) -> i64 {
        self.comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .count() as i64
    }

    fn sort_key(&self, post: &Post, field: SortField) -> i64 {
        match field {
            SortField::CreatedAt => post.created_at.timestamp_micros(),
            SortField::ModifiedAt => post.modified_at.timestamp_micros(),
            SortField::Id => post.id.into_inner(),
            SortField::Score => self.score(post.item_ref()),
            SortField::ReactionCount => self.reaction_count(post.item_ref()),
            SortField::CommentCount => self.comment_count(post.id),
        }
    }

    fn drop_interactions(&mut self, item: ItemRef) {
        self.votes.retain(|(i, _), _| *i != item);
        self.reactions.retain(|(i, _, _), _| *i != item);
    }
}

/// Thread-safe in-memory content and interaction store
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vote rows held for `(item, user)`
    pub fn vote_rows(&self, item: ItemRef, user_id: Snowflake) -> usize {
        self.state
            .read()
            .votes
            .keys()
            .filter(|(i, u)| *i == item && *u == user_id)
            .count()
    }

    /// The stored vote row for `(item, user)`, timestamps included
    pub fn vote_record(&self, item: ItemRef, user_id: Snowflake) -> Option<Vote> {
        self.state.read().votes.get(&(item, user_id)).cloned()
    }

    /// Number of reaction rows held for `(item, user, kind)`
    pub fn reaction_rows(&self, item: ItemRef, user_id: Snowflake, kind: ReactionKind) -> usize {
        usize::from(self.state.read().reactions.contains_key(&(item, user_id, kind)))
    }

    /// Vote and reaction rows attached to an item
    pub fn interaction_rows(&self, item: ItemRef) -> usize {
        let state = self.state.read();
        state.votes.keys().filter(|(i, _)| *i == item).count()
            + state.reactions.keys().filter(|(i, _, _)| *i == item).count()
    }
}

fn paginate<T>(rows: Vec<T>, page: PageRequest) -> Vec<T> {
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(0);
    rows.into_iter().skip(offset).take(limit).collect()
}

// ============================================================================
// Posts
// ============================================================================

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        Ok(self.state.read().posts.get(&id).cloned())
    }

    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        Ok(self.state.read().posts.contains_key(&id))
    }

    async fn list(&self, query: &PostQuery) -> RepoResult<Vec<Post>> {
        let state = self.state.read();
        let mut keyed: Vec<(i64, Post)> = state
            .posts
            .values()
            .map(|post| (state.sort_key(post, query.sort_field), post.clone()))
            .collect();

        keyed.sort_by(|(ka, a), (kb, b)| {
            let primary = match query.sort_order {
                SortOrder::Asc => ka.cmp(kb),
                SortOrder::Desc => kb.cmp(ka),
            };
            match primary {
                Ordering::Equal => a.id.cmp(&b.id),
                other => other,
            }
        });

        let posts = keyed.into_iter().map(|(_, post)| post).collect();
        Ok(paginate(posts, query.page))
    }

    async fn create(&self, post: &Post) -> RepoResult<()> {
        let mut state = self.state.write();
        if state.posts.contains_key(&post.id) {
            return Err(DomainError::Conflict(format!("post {} already exists", post.id)));
        }
        state.posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.write();
        if state.posts.remove(&id).is_none() {
            return Ok(());
        }

        let comment_ids: Vec<Snowflake> = state
            .comments
            .values()
            .filter(|comment| comment.post_id == id)
            .map(|comment| comment.id)
            .collect();

        for comment_id in comment_ids {
            state.comments.remove(&comment_id);
            state.drop_interactions(ItemRef::Comment(comment_id));
        }
        state.drop_interactions(ItemRef::Post(id));
        Ok(())
    }
}

// ============================================================================
// Comments
// ============================================================================

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.state.read().comments.get(&id).cloned())
    }

    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>> {
        Ok(self
            .state
            .read()
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let mut state = self.state.write();
        if !state.posts.contains_key(&comment.post_id) {
            return Err(DomainError::PostNotFound(comment.post_id));
        }
        if let Some(parent_id) = comment.parent_id {
            let same_post = state
                .comments
                .get(&parent_id)
                .is_some_and(|parent| parent.post_id == comment.post_id);
            if !same_post {
                return Err(DomainError::ParentCommentNotFound(parent_id));
            }
        }
        if state.comments.contains_key(&comment.id) {
            return Err(DomainError::Conflict(format!(
                "comment {} already exists",
                comment.id
            )));
        }
        state.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.write();
        let comment = state
            .comments
            .get_mut(&id)
            .ok_or(DomainError::CommentNotFound(id))?;
        comment.is_deleted = true;
        comment.modified_at = chrono::Utc::now();
        Ok(())
    }

    async fn count_by_posts(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, i64)>> {
        let state = self.state.read();
        let mut counts: HashMap<Snowflake, i64> = HashMap::new();
        for comment in state.comments.values() {
            if post_ids.contains(&comment.post_id) {
                *counts.entry(comment.post_id).or_default() += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }

    async fn list_recent(&self, page: PageRequest) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self.state.read().comments.values().cloned().collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(paginate(comments, page))
    }
}

// ============================================================================
// Votes
// ============================================================================

#[async_trait]
impl VoteRepository for MemoryStore {
    async fn upsert(&self, vote: &Vote) -> RepoResult<()> {
        let mut state = self.state.write();
        state
            .votes
            .entry((vote.item, vote.user_id))
            .and_modify(|existing| {
                existing.value = vote.value;
                existing.modified_at = vote.modified_at;
            })
            .or_insert_with(|| vote.clone());
        Ok(())
    }

    async fn remove(&self, item: ItemRef, user_id: Snowflake) -> RepoResult<()> {
        self.state.write().votes.remove(&(item, user_id));
        Ok(())
    }

    async fn find(&self, item: ItemRef, user_id: Snowflake) -> RepoResult<Option<VoteValue>> {
        Ok(self
            .state
            .read()
            .votes
            .get(&(item, user_id))
            .map(|vote| vote.value))
    }

    async fn tally(&self, kind: ItemKind, ids: &[Snowflake]) -> RepoResult<Vec<VoteTally>> {
        let state = self.state.read();
        let mut counts: HashMap<(Snowflake, VoteValue), i64> = HashMap::new();
        for vote in state.votes.values() {
            if vote.item.kind() == kind && ids.contains(&vote.item.id()) {
                *counts.entry((vote.item.id(), vote.value)).or_default() += 1;
            }
        }
        Ok(counts
            .into_iter()
            .map(|((item_id, value), count)| VoteTally {
                item_id,
                value,
                count,
            })
            .collect())
    }

    async fn find_for_user(
        &self,
        kind: ItemKind,
        ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<(Snowflake, VoteValue)>> {
        Ok(self
            .state
            .read()
            .votes
            .values()
            .filter(|vote| {
                vote.user_id == user_id && vote.item.kind() == kind && ids.contains(&vote.item.id())
            })
            .map(|vote| (vote.item.id(), vote.value))
            .collect())
    }
}

// ============================================================================
// Reactions
// ============================================================================

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn add(&self, reaction: &Reaction) -> RepoResult<()> {
        self.state
            .write()
            .reactions
            .entry((reaction.item, reaction.user_id, reaction.kind))
            .or_insert_with(|| reaction.clone());
        Ok(())
    }

    async fn remove(
        &self,
        item: ItemRef,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<()> {
        self.state.write().reactions.remove(&(item, user_id, kind));
        Ok(())
    }

    async fn exists(
        &self,
        item: ItemRef,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<bool> {
        Ok(self
            .state
            .read()
            .reactions
            .contains_key(&(item, user_id, kind)))
    }

    async fn tally(&self, kind: ItemKind, ids: &[Snowflake]) -> RepoResult<Vec<ReactionTally>> {
        let state = self.state.read();
        let mut counts: BTreeMap<(Snowflake, ReactionKind), i64> = BTreeMap::new();
        for (item, _, reaction_kind) in state.reactions.keys() {
            if item.kind() == kind && ids.contains(&item.id()) {
                *counts.entry((item.id(), *reaction_kind)).or_default() += 1;
            }
        }
        Ok(counts
            .into_iter()
            .map(|((item_id, kind), count)| ReactionTally {
                item_id,
                kind,
                count,
            })
            .collect())
    }

    async fn find_for_user(
        &self,
        kind: ItemKind,
        ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<(Snowflake, ReactionKind)>> {
        let state = self.state.read();
        let held: BTreeSet<(Snowflake, ReactionKind)> = state
            .reactions
            .keys()
            .filter(|(item, user, _)| {
                *user == user_id && item.kind() == kind && ids.contains(&item.id())
            })
            .map(|(item, _, reaction_kind)| (item.id(), *reaction_kind))
            .collect();
        Ok(held.into_iter().collect())
    }
}
