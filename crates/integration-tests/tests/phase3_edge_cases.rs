//! Phase 3 Edge Cases - Ownership, Deleted Users & Hostile Input
//!
//! Gaps a service-level happy path does not cover: authorship checks
//! against the wrong parent, display of deleted accounts, blank and
//! hostile input at every write surface.

use std::sync::Arc;

use tradepost_core::application::{
    CommentService, FriendService, ItemService, PostService, RatingService, UserService,
};
use tradepost_core::domain::DELETED_USER;
use tradepost_core::error::AppError;
use tradepost_core::port::id_provider::UuidProvider;
use tradepost_core::port::password_hasher::Argon2PasswordHasher;
use tradepost_core::port::time_provider::SystemTimeProvider;
use tradepost_infra_sqlite::{
    create_pool, run_migrations, SqliteCommentRepository, SqliteFriendRepository,
    SqliteItemRepository, SqlitePostRepository, SqliteRatingRepository, SqliteSessionStore,
    SqliteUserRepository,
};

struct Social {
    items: ItemService,
    comments: CommentService,
    posts: PostService,
    ratings: RatingService,
    friends: FriendService,
}

fn wire(pool: sqlx::SqlitePool) -> Social {
    let id_provider = Arc::new(UuidProvider);
    let time_provider = Arc::new(SystemTimeProvider);
    let item_repo = Arc::new(SqliteItemRepository::new(pool.clone()));
    let comment_repo = Arc::new(SqliteCommentRepository::new(pool.clone()));
    let post_repo = Arc::new(SqlitePostRepository::new(pool.clone()));
    let rating_repo = Arc::new(SqliteRatingRepository::new(pool.clone()));
    let friend_repo = Arc::new(SqliteFriendRepository::new(pool));

    Social {
        items: ItemService::new(item_repo.clone(), id_provider.clone(), time_provider.clone()),
        comments: CommentService::new(
            comment_repo,
            item_repo.clone(),
            id_provider.clone(),
            time_provider.clone(),
        ),
        posts: PostService::new(post_repo, id_provider.clone(), time_provider.clone()),
        ratings: RatingService::new(rating_repo, item_repo, id_provider.clone(), time_provider.clone()),
        friends: FriendService::new(friend_repo, id_provider, time_provider),
    }
}

/// Edge Case 1: Comment ownership is checked against the right parent item
#[tokio::test]
async fn test_comment_ownership_against_wrong_parent() {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let social = wire(pool);

    let couch = social
        .items
        .create("seller-1", "couch", 120, "", vec![], "")
        .await
        .unwrap();
    let lamp = social
        .items
        .create("seller-1", "lamp", 30, "", vec![], "")
        .await
        .unwrap();

    let comment = social
        .comments
        .create(&couch.id, "buyer-a", "mine!")
        .await
        .unwrap();

    // Right item, right author
    social
        .comments
        .assert_commenter(&comment.id, &couch.id, "buyer-a")
        .await
        .unwrap();

    // Wrong item: the comment must be invisible there, not Forbidden
    let err = social
        .comments
        .assert_commenter(&comment.id, &lamp.id, "buyer-a")
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    // Right item, wrong author
    let err = social
        .comments
        .assert_commenter(&comment.id, &couch.id, "buyer-b")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    println!("✅ Edge Case 1: comment ownership checked against the parent item");
}

/// Edge Case 2: Content by deleted accounts renders as DELETED_USER
#[tokio::test]
async fn test_deleted_author_renders_placeholder() {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let social = wire(pool.clone());

    let users = UserService::new(
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteSessionStore::new(pool)),
        Arc::new(Argon2PasswordHasher),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
    );

    let seller = users.register("seller_june", "hunter2hunter2").await.unwrap();
    let buyer = users.register("buyer_mina", "hunter2hunter2").await.unwrap();

    let item = social
        .items
        .create(&seller.id, "couch", 120, "", vec![], "")
        .await
        .unwrap();
    let comment = social
        .comments
        .create(&item.id, &buyer.id, "still available?")
        .await
        .unwrap();

    users.delete(&buyer.id).await.unwrap();

    // The comment row survives; only the display name degrades
    let thread = social.comments.list_for_item(&item.id).await.unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].id, comment.id);

    let names = users
        .usernames_for(&[seller.id.clone(), buyer.id.clone()])
        .await
        .unwrap();
    assert_eq!(names[0], "seller_june");
    assert_eq!(names[1], DELETED_USER);

    println!("✅ Edge Case 2: deleted accounts render as {}", DELETED_USER);
}

/// Edge Case 3: Blank text is rejected at every write surface
#[tokio::test]
async fn test_blank_input_rejected() {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let social = wire(pool);

    let err = social
        .posts
        .create("author-1", "   ", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let item = social
        .items
        .create("seller-1", "couch", 120, "", vec![], "")
        .await
        .unwrap();
    let err = social
        .comments
        .create(&item.id, "buyer-a", "")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = social
        .items
        .create("seller-1", "  ", 10, "", vec![], "")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(_)));

    println!("✅ Edge Case 3: blank input rejected everywhere");
}

/// Edge Case 4: Rating scores outside 1..=5 never reach the store
#[tokio::test]
async fn test_rating_score_bounds() {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let social = wire(pool);

    let item = social
        .items
        .create("seller-1", "couch", 120, "", vec![], "")
        .await
        .unwrap();

    for bad_score in [0, 6, -1, 100] {
        let err = social
            .ratings
            .rate(&item.id, "buyer-a", bad_score)
            .await
            .unwrap_err();
        assert!(
            matches!(err, AppError::Domain(_)),
            "score {} must be rejected",
            bad_score
        );
    }

    // Bounds themselves are valid
    social.ratings.rate(&item.id, "buyer-a", 1).await.unwrap();
    social
        .ratings
        .update_rating(&item.id, "buyer-a", 5)
        .await
        .unwrap();
    assert_eq!(social.ratings.seller_average("seller-1").await.unwrap(), 5.0);

    println!("✅ Edge Case 4: score bounds enforced");
}

/// Edge Case 5: A retracted request disappears; acting on a missing one is NotFound
#[tokio::test]
async fn test_friend_request_retraction() {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let social = wire(pool);

    social.friends.send_request("alice", "bob").await.unwrap();
    social.friends.remove_request("alice", "bob").await.unwrap();

    // Nothing left to accept
    let err = social
        .friends
        .accept_request("alice", "bob")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(social.friends.list_friends("bob").await.unwrap().is_empty());

    // Retraction does not block a fresh request
    social.friends.send_request("alice", "bob").await.unwrap();
    social.friends.accept_request("alice", "bob").await.unwrap();
    assert_eq!(
        social.friends.list_friends("alice").await.unwrap(),
        vec!["bob"]
    );

    println!("✅ Edge Case 5: request retraction verified");
}

/// Edge Case 6: Hostile and unicode text roundtrips untouched
#[tokio::test]
async fn test_hostile_text_roundtrips() {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let social = wire(pool);

    let name = "Robert'); DROP TABLE items;--";
    let description = "아주 편한 소파 (very comfy couch)";
    let item = social
        .items
        .create("seller-1", name, 120, description, vec![], "")
        .await
        .unwrap();

    let body = r#"It's "mint", right? <script>alert(1)</script>"#;
    let comment = social
        .comments
        .create(&item.id, "buyer-a", body)
        .await
        .unwrap();

    // Everything comes back byte for byte
    let fetched = social.items.get(&item.id).await.unwrap();
    assert_eq!(fetched.name, name);
    assert_eq!(fetched.description, description);
    let thread = social.comments.list_for_item(&item.id).await.unwrap();
    assert_eq!(thread[0].id, comment.id);
    assert_eq!(thread[0].body, body);

    // And the tables are still standing
    social
        .items
        .create("seller-1", "lamp", 30, "", vec![], "")
        .await
        .unwrap();
    assert_eq!(social.items.list().await.unwrap().len(), 2);

    println!("✅ Edge Case 6: hostile text stored and returned untouched");
}
