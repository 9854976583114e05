//! Service-level tests over the in-memory store
//!
//! These need no external services.
//!
//! Run with: cargo test -p integration-tests --test service_tests

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use integration_tests::{memory_context, MemoryStore};
use quip_core::{
    Caller, Comment, CommentRepository, DomainError, ItemRef, PageRequest, Post, PostQuery,
    PostRepository, ReactionKind, Snowflake, SortField, SortOrder, Vote, VoteRepository,
    VoteValue,
};
use quip_service::{
    CommentService, CreateCommentRequest, CreatePostRequest, InteractionService, PostService,
    ReactionRequest, ServiceContext, ServiceError, VoteRequest,
};

fn setup() -> (Arc<MemoryStore>, ServiceContext) {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(store.clone()).unwrap();
    (store, ctx)
}

fn user(id: i64) -> Caller {
    Caller::user(Snowflake::new(id))
}

fn domain(err: &ServiceError) -> &DomainError {
    err.as_domain()
        .unwrap_or_else(|| panic!("expected a domain error, got {err:?}"))
}

async fn create_post(ctx: &ServiceContext, author: i64, body: &str) -> Snowflake {
    let post = PostService::new(ctx)
        .create_post(
            &user(author),
            CreatePostRequest {
                body: body.to_string(),
            },
        )
        .await
        .unwrap();
    post.id.parse().unwrap()
}

async fn create_comment(
    ctx: &ServiceContext,
    post_id: Snowflake,
    author: i64,
    body: &str,
    parent_id: Option<Snowflake>,
) -> Snowflake {
    let comment = CommentService::new(ctx)
        .create_comment(
            post_id,
            &user(author),
            CreateCommentRequest {
                body: body.to_string(),
                parent_id,
            },
        )
        .await
        .unwrap();
    comment.id.parse().unwrap()
}

fn vote(value: &str) -> VoteRequest {
    VoteRequest {
        vote: Some(value.to_string()),
    }
}

// ============================================================================
// Votes
// ============================================================================

#[tokio::test]
async fn test_vote_is_idempotent() {
    let (store, ctx) = setup();
    let post_id = create_post(&ctx, 1, "first post").await;
    let item = ItemRef::Post(post_id);
    let service = InteractionService::new(&ctx);

    service.set_vote(item, &user(2), VoteValue::Plus).await.unwrap();
    let stats = service.set_vote(item, &user(2), VoteValue::Plus).await.unwrap();

    assert_eq!(store.vote_rows(item, Snowflake::new(2)), 1);
    assert_eq!(stats.score, 1);
    assert_eq!(stats.viewer.unwrap().vote, Some(VoteValue::Plus));
}

#[tokio::test]
async fn test_repeated_vote_refreshes_modified_at() {
    let (store, ctx) = setup();
    let post_id = create_post(&ctx, 1, "timestamps on votes").await;
    let item = ItemRef::Post(post_id);
    let voter = Snowflake::new(2);

    let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let later = first + Duration::minutes(5);
    let vote_at = |at| Vote {
        item,
        user_id: voter,
        value: VoteValue::Plus,
        created_at: at,
        modified_at: at,
    };

    store.upsert(&vote_at(first)).await.unwrap();
    store.upsert(&vote_at(later)).await.unwrap();

    let stored = store.vote_record(item, voter).unwrap();
    assert_eq!(stored.value, VoteValue::Plus);
    assert_eq!(stored.created_at, first);
    assert_eq!(stored.modified_at, later);
    assert_eq!(store.vote_rows(item, voter), 1);
}

#[tokio::test]
async fn test_switching_vote_moves_score_by_two() {
    let (store, ctx) = setup();
    let post_id = create_post(&ctx, 1, "first post").await;
    let item = ItemRef::Post(post_id);
    let service = InteractionService::new(&ctx);

    service.set_vote(item, &user(3), VoteValue::Plus).await.unwrap();
    let before = service.set_vote(item, &user(2), VoteValue::Plus).await.unwrap();
    let after = service.set_vote(item, &user(2), VoteValue::Minus).await.unwrap();

    assert_eq!(before.score, 2);
    assert_eq!(after.score - before.score, -2);
    assert_eq!(store.vote_rows(item, Snowflake::new(2)), 1);
}

#[tokio::test]
async fn test_wire_vote_values() {
    let (store, ctx) = setup();
    let post_id = create_post(&ctx, 1, "first post").await;
    let item = ItemRef::Post(post_id);
    let service = InteractionService::new(&ctx);

    let stats = service.apply_vote(item, &user(2), vote("minus")).await.unwrap();
    assert_eq!(stats.score, -1);

    let stats = service.apply_vote(item, &user(2), vote("")).await.unwrap();
    assert_eq!(stats.score, 0);
    assert_eq!(store.vote_rows(item, Snowflake::new(2)), 0);

    // Removing again is not an error
    service
        .apply_vote(item, &user(2), VoteRequest::default())
        .await
        .unwrap();

    let err = service
        .apply_vote(item, &user(2), vote("sideways"))
        .await
        .unwrap_err();
    assert!(domain(&err).is_validation());
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_get_vote() {
    let (_store, ctx) = setup();
    let post_id = create_post(&ctx, 1, "first post").await;
    let item = ItemRef::Post(post_id);
    let service = InteractionService::new(&ctx);

    assert_eq!(service.get_vote(item, &user(2)).await.unwrap().vote, None);

    service.set_vote(item, &user(2), VoteValue::Minus).await.unwrap();
    let current = service.get_vote(item, &user(2)).await.unwrap();
    assert_eq!(current.vote, Some(VoteValue::Minus));
    assert_eq!(current.item_id, post_id.to_string());
}

// ============================================================================
// Reactions
// ============================================================================

#[tokio::test]
async fn test_reactions_have_set_semantics() {
    let (store, ctx) = setup();
    let post_id = create_post(&ctx, 1, "first post").await;
    let item = ItemRef::Post(post_id);
    let service = InteractionService::new(&ctx);

    service.add_reaction(item, &user(2), ReactionKind::Laugh).await.unwrap();
    service.add_reaction(item, &user(2), ReactionKind::Laugh).await.unwrap();
    assert_eq!(store.reaction_rows(item, Snowflake::new(2), ReactionKind::Laugh), 1);

    // Removing an absent reaction is a no-op
    service.remove_reaction(item, &user(2), ReactionKind::Heart).await.unwrap();

    let stats = service.stats(item, &user(2)).await.unwrap();
    assert_eq!(stats.reactions.get(&ReactionKind::Laugh), Some(&1));
    assert_eq!(stats.reactions.get(&ReactionKind::Heart), None);

    service.remove_reaction(item, &user(2), ReactionKind::Laugh).await.unwrap();
    service.remove_reaction(item, &user(2), ReactionKind::Laugh).await.unwrap();
    assert!(!service.has_reaction(item, &user(2), ReactionKind::Laugh).await.unwrap());
}

#[tokio::test]
async fn test_toggle_reaction() {
    let (_store, ctx) = setup();
    let post_id = create_post(&ctx, 1, "first post").await;
    let item = ItemRef::Post(post_id);
    let service = InteractionService::new(&ctx);
    let request = || ReactionRequest {
        kind: "fire".to_string(),
    };

    let added = service.toggle_reaction(item, &user(2), request()).await.unwrap();
    assert!(added.active);
    assert_eq!(added.stats.reactions.get(&ReactionKind::Fire), Some(&1));

    let removed = service.toggle_reaction(item, &user(2), request()).await.unwrap();
    assert!(!removed.active);
    assert!(removed.stats.reactions.is_empty());

    let err = service
        .toggle_reaction(
            item,
            &user(2),
            ReactionRequest {
                kind: "Fire".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::InvalidReactionKind(_)));
}

#[tokio::test]
async fn test_interactions_on_missing_items() {
    let (store, ctx) = setup();
    let service = InteractionService::new(&ctx);
    let missing_post = ItemRef::Post(Snowflake::new(404));
    let missing_comment = ItemRef::Comment(Snowflake::new(405));

    let err = service
        .set_vote(missing_post, &user(2), VoteValue::Plus)
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::PostNotFound(_)));

    let err = service
        .add_reaction(missing_comment, &user(2), ReactionKind::Heart)
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::CommentNotFound(_)));
    assert_eq!(err.status_code(), 404);

    assert_eq!(store.interaction_rows(missing_post), 0);
    assert_eq!(store.interaction_rows(missing_comment), 0);
}

#[tokio::test]
async fn test_anonymous_callers_cannot_write() {
    let (store, ctx) = setup();
    let anonymous = Caller::anonymous();

    let err = PostService::new(&ctx)
        .create_post(
            &anonymous,
            CreatePostRequest {
                body: "who am i".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(domain(&err).is_unauthenticated());
    assert_eq!(err.status_code(), 401);

    let post_id = create_post(&ctx, 1, "first post").await;
    let item = ItemRef::Post(post_id);
    let interactions = InteractionService::new(&ctx);

    let err = interactions
        .set_vote(item, &anonymous, VoteValue::Plus)
        .await
        .unwrap_err();
    assert!(domain(&err).is_unauthenticated());

    // User id zero is treated as anonymous
    let err = interactions
        .add_reaction(item, &user(0), ReactionKind::Heart)
        .await
        .unwrap_err();
    assert!(domain(&err).is_unauthenticated());
    assert_eq!(store.interaction_rows(item), 0);

    let err = CommentService::new(&ctx)
        .create_comment(
            post_id,
            &anonymous,
            CreateCommentRequest {
                body: "hi".to_string(),
                parent_id: None,
            },
        )
        .await
        .unwrap_err();
    assert!(domain(&err).is_unauthenticated());
}

// ============================================================================
// Posts
// ============================================================================

#[tokio::test]
async fn test_end_to_end_scenario() {
    let (_store, ctx) = setup();
    let post_id = create_post(&ctx, 1, "knock knock").await;
    let item = ItemRef::Post(post_id);
    let interactions = InteractionService::new(&ctx);

    interactions.set_vote(item, &user(2), VoteValue::Plus).await.unwrap();
    interactions.add_reaction(item, &user(2), ReactionKind::Laugh).await.unwrap();

    let posts = PostService::new(&ctx);

    let seen_by_voter = posts.get_post(post_id, &user(2)).await.unwrap();
    assert_eq!(seen_by_voter.score, 1);
    assert_eq!(seen_by_voter.reactions.get(&ReactionKind::Laugh), Some(&1));
    assert_eq!(seen_by_voter.reactions.len(), 1);
    let viewer = seen_by_voter.viewer.unwrap();
    assert_eq!(viewer.vote, Some(VoteValue::Plus));
    assert_eq!(viewer.reactions, vec![ReactionKind::Laugh]);

    let seen_by_other = posts.get_post(post_id, &user(3)).await.unwrap();
    assert_eq!(seen_by_other.score, 1);
    assert_eq!(seen_by_other.reactions, seen_by_voter.reactions);
    let viewer = seen_by_other.viewer.unwrap();
    assert_eq!(viewer.vote, None);
    assert!(viewer.reactions.is_empty());

    let anonymous = posts.get_post(post_id, &Caller::anonymous()).await.unwrap();
    assert!(anonymous.viewer.is_none());
}

#[tokio::test]
async fn test_non_author_cannot_delete_post() {
    let (_store, ctx) = setup();
    let post_id = create_post(&ctx, 1, "mine alone").await;
    let posts = PostService::new(&ctx);

    let err = posts.delete_post(post_id, &user(2)).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotPostAuthor));
    assert_eq!(err.status_code(), 403);

    let unchanged = posts.get_post(post_id, &user(1)).await.unwrap();
    assert_eq!(unchanged.body, "mine alone");

    posts
        .delete_post(post_id, &Caller::privileged(Snowflake::new(99)))
        .await
        .unwrap();
    let err = posts.get_post(post_id, &user(1)).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::PostNotFound(_)));
}

#[tokio::test]
async fn test_delete_post_cascades() {
    let (store, ctx) = setup();
    let post_id = create_post(&ctx, 1, "short lived").await;
    let comment_id = create_comment(&ctx, post_id, 2, "reply", None).await;
    let interactions = InteractionService::new(&ctx);

    interactions
        .set_vote(ItemRef::Post(post_id), &user(3), VoteValue::Plus)
        .await
        .unwrap();
    interactions
        .add_reaction(ItemRef::Comment(comment_id), &user(3), ReactionKind::Heart)
        .await
        .unwrap();

    PostService::new(&ctx).delete_post(post_id, &user(1)).await.unwrap();

    assert_eq!(store.interaction_rows(ItemRef::Post(post_id)), 0);
    assert_eq!(store.interaction_rows(ItemRef::Comment(comment_id)), 0);
    let err = CommentService::new(&ctx)
        .get_comment(comment_id, &user(1))
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::CommentNotFound(_)));
}

#[tokio::test]
async fn test_post_body_rules() {
    let (_store, ctx) = setup();
    let posts = PostService::new(&ctx);
    let create = |body: &str| CreatePostRequest {
        body: body.to_string(),
    };

    let err = posts.create_post(&user(1), create("   ")).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::EmptyBody));

    let err = posts.create_post(&user(1), create("hi")).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::BodyTooShort { .. }));

    let err = posts
        .create_post(&user(1), create("look <script>alert(1)</script>"))
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::UnsafeContent(_)));

    let post = posts.create_post(&user(1), create("  padded  ")).await.unwrap();
    assert_eq!(post.body, "padded");
    assert_eq!(post.comment_count, 0);
}

#[tokio::test]
async fn test_garbage_listing_parameters_equal_defaults() {
    let (_store, ctx) = setup();
    for n in 0..12 {
        create_post(&ctx, 1, &format!("post number {n}")).await;
    }
    let posts = PostService::new(&ctx);

    let garbage = PostQuery::parse_lenient(
        Some("-1"),
        Some("9999"),
        Some("dropColumn"),
        Some("sideways"),
    );
    let explicit = PostQuery::parse_lenient(
        Some("1"),
        Some("10"),
        Some("created_at"),
        Some("desc"),
    );

    let a = posts.list_posts(garbage, &user(2)).await.unwrap();
    let b = posts.list_posts(explicit, &user(2)).await.unwrap();

    let ids = |page: &quip_service::PaginatedResponse<quip_service::PostResponse>| {
        page.data.iter().map(|p| p.id.clone()).collect::<Vec<_>>()
    };
    assert_eq!(ids(&a), ids(&b));
    assert_eq!(a.data.len(), 10);
    assert_eq!(a.pagination.page, 1);
    assert_eq!(a.pagination.page_size, 10);
    assert!(a.pagination.has_more);

    let second = posts
        .list_posts(PostQuery::parse_lenient(Some("2"), None, None, None), &user(2))
        .await
        .unwrap();
    assert_eq!(second.data.len(), 2);
    assert!(!second.pagination.has_more);
}

#[tokio::test]
async fn test_list_posts_by_score() {
    let (_store, ctx) = setup();
    let low = create_post(&ctx, 1, "low score").await;
    let high = create_post(&ctx, 1, "high score").await;
    let middle = create_post(&ctx, 1, "middle score").await;
    let interactions = InteractionService::new(&ctx);

    for voter in 2..5 {
        interactions
            .set_vote(ItemRef::Post(high), &user(voter), VoteValue::Plus)
            .await
            .unwrap();
    }
    interactions
        .set_vote(ItemRef::Post(middle), &user(2), VoteValue::Plus)
        .await
        .unwrap();
    interactions
        .set_vote(ItemRef::Post(low), &user(2), VoteValue::Minus)
        .await
        .unwrap();

    let query = PostQuery {
        page: PageRequest::posts_default(),
        sort_field: SortField::Score,
        sort_order: SortOrder::Desc,
    };
    let listed = PostService::new(&ctx)
        .list_posts(query, &Caller::anonymous())
        .await
        .unwrap();

    let order: Vec<String> = listed.data.iter().map(|p| p.id.clone()).collect();
    assert_eq!(order, vec![high.to_string(), middle.to_string(), low.to_string()]);
    assert_eq!(listed.data[0].score, 3);
    assert!(listed.data.iter().all(|p| p.viewer.is_none()));
}

// ============================================================================
// Comments
// ============================================================================

#[tokio::test]
async fn test_soft_delete_preserves_thread_shape() {
    let (_store, ctx) = setup();
    let post_id = create_post(&ctx, 1, "discussion").await;
    let a = create_comment(&ctx, post_id, 2, "A", None).await;
    let b = create_comment(&ctx, post_id, 3, "B", Some(a)).await;
    let c = create_comment(&ctx, post_id, 4, "C", None).await;
    let comments = CommentService::new(&ctx);

    comments.delete_comment(b, &user(3)).await.unwrap();

    let thread = comments.list_for_post(post_id, &user(1)).await.unwrap();
    let ids: Vec<String> = thread.iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids, vec![a.to_string(), b.to_string(), c.to_string()]);

    assert_eq!(thread[1].body, "");
    assert!(thread[1].is_deleted);
    assert_eq!(thread[1].parent_id, Some(a.to_string()));
    assert_eq!(thread[0].body, "A");

    // Deleted comments still count
    let post = PostService::new(&ctx).get_post(post_id, &user(1)).await.unwrap();
    assert_eq!(post.comment_count, 3);
}

#[tokio::test]
async fn test_thread_groups_by_root_id() {
    let (store, ctx) = setup();
    let post_id = Snowflake::new(1);
    PostRepository::create(
        store.as_ref(),
        &Post::new(post_id, Snowflake::new(10), "thread order".to_string()),
    )
    .await
    .unwrap();

    let base = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let comment = |id: i64, parent: Option<i64>, minute: i64| {
        let mut c = Comment::new(
            Snowflake::new(id),
            post_id,
            Snowflake::new(20),
            format!("comment {id}"),
        );
        c.parent_id = parent.map(Snowflake::new);
        c.created_at = base + Duration::minutes(minute);
        c.modified_at = c.created_at;
        c
    };

    // Root 5 is written before root 2; the reply to 5 comes last
    for c in [comment(5, None, 0), comment(2, None, 1), comment(7, Some(5), 2)] {
        CommentRepository::create(store.as_ref(), &c).await.unwrap();
    }

    let thread = CommentService::new(&ctx)
        .list_for_post(post_id, &Caller::anonymous())
        .await
        .unwrap();
    let ids: Vec<&str> = thread.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "5", "7"]);
}

#[tokio::test]
async fn test_reply_chains_group_under_top_root() {
    let (_store, ctx) = setup();
    let post_id = create_post(&ctx, 1, "deep thread").await;
    let root = create_comment(&ctx, post_id, 2, "root", None).await;
    let reply = create_comment(&ctx, post_id, 3, "reply", Some(root)).await;
    let other_root = create_comment(&ctx, post_id, 4, "other root", None).await;
    let nested = create_comment(&ctx, post_id, 5, "nested", Some(reply)).await;

    let thread = CommentService::new(&ctx)
        .list_for_post(post_id, &Caller::anonymous())
        .await
        .unwrap();
    let ids: Vec<String> = thread.iter().map(|c| c.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            root.to_string(),
            reply.to_string(),
            nested.to_string(),
            other_root.to_string()
        ]
    );
}

#[tokio::test]
async fn test_comment_parent_must_share_post() {
    let (_store, ctx) = setup();
    let first = create_post(&ctx, 1, "first post").await;
    let second = create_post(&ctx, 1, "second post").await;
    let parent = create_comment(&ctx, first, 2, "parent", None).await;
    let comments = CommentService::new(&ctx);

    let err = comments
        .create_comment(
            second,
            &user(3),
            CreateCommentRequest {
                body: "wrong thread".to_string(),
                parent_id: Some(parent),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::ParentCommentNotFound(_)));

    let err = comments
        .create_comment(
            Snowflake::new(404),
            &user(3),
            CreateCommentRequest {
                body: "nowhere".to_string(),
                parent_id: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::PostNotFound(_)));

    let err = comments
        .list_for_post(Snowflake::new(404), &Caller::anonymous())
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::PostNotFound(_)));
}

#[tokio::test]
async fn test_comment_delete_authorization() {
    let (_store, ctx) = setup();
    let post_id = create_post(&ctx, 1, "discussion").await;
    let comment_id = create_comment(&ctx, post_id, 2, "mine", None).await;
    let comments = CommentService::new(&ctx);

    let err = comments.delete_comment(comment_id, &user(1)).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotCommentAuthor));

    let err = comments
        .delete_comment(comment_id, &Caller::anonymous())
        .await
        .unwrap_err();
    assert!(domain(&err).is_unauthenticated());

    comments
        .delete_comment(comment_id, &Caller::privileged(Snowflake::new(99)))
        .await
        .unwrap();
    // Already deleted: still succeeds
    comments.delete_comment(comment_id, &user(2)).await.unwrap();

    let err = comments
        .delete_comment(Snowflake::new(404), &user(2))
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::CommentNotFound(_)));
}

#[tokio::test]
async fn test_moderation_list() {
    let (_store, ctx) = setup();
    let post_id = create_post(&ctx, 1, "discussion").await;
    let first = create_comment(&ctx, post_id, 2, "first", None).await;
    let second = create_comment(&ctx, post_id, 3, "second", None).await;
    let comments = CommentService::new(&ctx);
    comments.delete_comment(first, &user(2)).await.unwrap();

    let err = comments
        .list_recent(PageRequest::moderation_default(), &user(2))
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::PrivilegeRequired));
    assert_eq!(err.status_code(), 403);

    let err = comments
        .list_recent(PageRequest::moderation_default(), &Caller::anonymous())
        .await
        .unwrap_err();
    assert!(domain(&err).is_unauthenticated());

    let recent = comments
        .list_recent(
            PageRequest::moderation_default(),
            &Caller::privileged(Snowflake::new(99)),
        )
        .await
        .unwrap();
    let ids: Vec<String> = recent.data.iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids, vec![second.to_string(), first.to_string()]);
    assert!(recent.data[1].is_deleted);
    assert_eq!(recent.data[1].body, "");
    assert_eq!(recent.pagination.page_size, 50);
}
