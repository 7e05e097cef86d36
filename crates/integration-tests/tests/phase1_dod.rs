//! Phase 1 Definition of Done (DoD) Integration Tests
//!
//! Accounts, sessions and item listings against real SQLite.

use std::sync::Arc;

use tradepost_core::application::{ItemService, SessionService, UserService};
use tradepost_core::domain::{ItemUpdate, DELETED_USER};
use tradepost_core::error::AppError;
use tradepost_core::port::id_provider::UuidProvider;
use tradepost_core::port::password_hasher::Argon2PasswordHasher;
use tradepost_core::port::time_provider::SystemTimeProvider;
use tradepost_infra_sqlite::{
    create_pool, run_migrations, SqliteItemRepository, SqliteSessionStore, SqliteUserRepository,
};

fn wire(pool: sqlx::SqlitePool) -> (UserService, SessionService, ItemService) {
    let time_provider = Arc::new(SystemTimeProvider);
    let id_provider = Arc::new(UuidProvider);
    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
    let session_store = Arc::new(SqliteSessionStore::new(pool.clone()));
    let item_repo = Arc::new(SqliteItemRepository::new(pool));

    let users = UserService::new(
        user_repo,
        session_store.clone(),
        Arc::new(Argon2PasswordHasher),
        id_provider.clone(),
        time_provider.clone(),
    );
    let sessions = SessionService::new(session_store, time_provider.clone(), 1);
    let items = ItemService::new(item_repo, id_provider, time_provider);

    (users, sessions, items)
}

/// DoD 1: Register, authenticate and resolve a session end to end
#[tokio::test]
async fn test_register_login_session_roundtrip() {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let (users, sessions, _) = wire(pool);

    let user = users.register("alice", "hunter2hunter2").await.unwrap();
    assert!(user.password_hash.starts_with("$argon2"));

    let authed = users.authenticate("alice", "hunter2hunter2").await.unwrap();
    assert_eq!(authed.id, user.id);

    let session = sessions.start(&user.id).await.unwrap();
    let resolved = sessions.resolve(&session.token).await.unwrap();
    assert_eq!(resolved, user.id);

    println!("✅ DoD 1: register/login/session roundtrip works");
}

/// DoD 2: Daemon restart keeps accounts and listings (no data loss)
#[tokio::test]
async fn test_persistence_after_restart() {
    let db_path = "/tmp/tradepost_test_persistence.db";

    // Cleanup previous test
    let _ = std::fs::remove_file(db_path);

    let (user_id, item_id);

    // Phase 1: Create an account and a listing
    {
        let pool = create_pool(db_path).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let (users, _, items) = wire(pool);

        let user = users
            .register("seller_june", "hunter2hunter2")
            .await
            .unwrap();
        let item = items
            .create(
                &user.id,
                "couch",
                120,
                "well-loved",
                vec![],
                "june@example.com",
            )
            .await
            .unwrap();
        user_id = user.id;
        item_id = item.id;

        // Simulate daemon shutdown (pool dropped)
    }

    // Phase 2: Restart daemon and verify data
    {
        let pool = create_pool(db_path).await.unwrap();
        // No migrations needed (already applied)
        let (users, _, items) = wire(pool);

        let user = users.get_by_username("seller_june").await.unwrap();
        assert_eq!(user.id, user_id);

        let item = items.get(&item_id).await.unwrap();
        assert_eq!(item.name, "couch");
        assert_eq!(item.seller, user_id);
        assert!(item.claim_queue.is_empty());
    }

    // Cleanup
    std::fs::remove_file(db_path).unwrap();
    println!("✅ DoD 2: accounts and listings persisted across restart");
}

/// DoD 3: Username uniqueness is enforced end to end
#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let (users, _, _) = wire(pool);

    users.register("alice", "hunter2hunter2").await.unwrap();

    let err = users.register("alice", "other-password").await.unwrap_err();
    assert!(err.is_conflict(), "expected Conflict, got {:?}", err);

    println!("✅ DoD 3: duplicate usernames rejected with Conflict");
}

/// DoD 4: Item CRUD with seller-only mutation
#[tokio::test]
async fn test_item_crud_with_ownership() {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let (users, _, items) = wire(pool);

    let seller = users
        .register("seller_june", "hunter2hunter2")
        .await
        .unwrap();
    let buyer = users
        .register("buyer_mina", "hunter2hunter2")
        .await
        .unwrap();

    let item = items
        .create(
            &seller.id,
            "road bike",
            250,
            "light frame",
            vec!["https://pics.example/bike.jpg".to_string()],
            "june@example.com",
        )
        .await
        .unwrap();

    // Listing is visible both globally and per seller
    let all = items.list().await.unwrap();
    assert_eq!(all.len(), 1);
    let mine = items.list_by_seller(&seller.id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, item.id);

    // Only the seller passes the ownership check
    items.assert_seller(&item.id, &seller.id).await.unwrap();
    let err = items.assert_seller(&item.id, &buyer.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Partial update leaves the other fields alone
    let updated = items
        .update(
            &item.id,
            ItemUpdate {
                cost: Some(200),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.cost, 200);
    assert_eq!(updated.name, "road bike");
    assert_eq!(updated.description, "light frame");
    assert_eq!(updated.pictures.len(), 1);

    // Delete removes the listing
    items.delete(&item.id).await.unwrap();
    let err = items.get(&item.id).await.unwrap_err();
    assert!(err.is_not_found());

    println!("✅ DoD 4: item CRUD with ownership checks works");
}

/// DoD 5: Deleting an account ends its sessions and anonymizes display names
#[tokio::test]
async fn test_delete_user_ends_sessions_and_anonymizes() {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let (users, sessions, _) = wire(pool);

    let user = users.register("alice", "hunter2hunter2").await.unwrap();
    let session = sessions.start(&user.id).await.unwrap();

    users.delete(&user.id).await.unwrap();

    let err = sessions.resolve(&session.token).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthenticated(_)));

    let names = users.usernames_for(&[user.id.clone()]).await.unwrap();
    assert_eq!(names, vec![DELETED_USER.to_string()]);

    println!("✅ DoD 5: account deletion ends sessions and anonymizes");
}

/// DoD 6: Password change requires the current password and retires the old one
#[tokio::test]
async fn test_password_change_flow() {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let (users, _, _) = wire(pool);

    let user = users.register("alice", "hunter2hunter2").await.unwrap();

    let err = users
        .update_password(&user.id, "wrong-current", "fresh-password-1")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthenticated(_)));

    users
        .update_password(&user.id, "hunter2hunter2", "fresh-password-1")
        .await
        .unwrap();

    users
        .authenticate("alice", "fresh-password-1")
        .await
        .unwrap();
    let err = users
        .authenticate("alice", "hunter2hunter2")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthenticated(_)));

    println!("✅ DoD 6: password change verified end to end");
}
