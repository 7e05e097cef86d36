//! Phase 4 DoD Verification Tests
//!
//! Phase 4 Definition of Done:
//! - [ ] Maintenance: expired-session GC touches only expired rows
//! - [ ] Maintenance: comments orphaned by item deletion are swept
//! - [ ] Stats: row counts and DB size reported accurately
//! - [ ] Full run: GC plus conditional VACUUM in one call
//! - [ ] Scheduler: background loop stops promptly on shutdown

use std::sync::Arc;
use std::time::Duration;

use tradepost_core::application::{
    shutdown_channel, CommentService, ItemService, MaintenanceScheduler,
};
use tradepost_core::domain::{Comment, Item, Session, User};
use tradepost_core::port::id_provider::UuidProvider;
use tradepost_core::port::time_provider::SystemTimeProvider;
use tradepost_core::port::{
    CommentRepository, ItemRepository, Maintenance, MaintenanceConfig, SessionStore, TimeProvider,
    UserRepository,
};
use tradepost_infra_sqlite::{
    create_pool, run_migrations, SqliteCommentRepository, SqliteItemRepository, SqliteMaintenance,
    SqliteSessionStore, SqliteUserRepository,
};

/// DoD 1: Session GC deletes expired rows and nothing else
#[tokio::test]
async fn test_session_gc_only_deletes_expired() {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let store = SqliteSessionStore::new(pool.clone());
    let maintenance = SqliteMaintenance::new(pool);

    let hour = 3600 * 1000;
    let now = 1_700_000_000_000_i64;
    store
        .insert(&Session::new("tok-live", "alice", now, hour))
        .await
        .unwrap();
    store
        .insert(&Session::new("tok-dead", "bob", now - 2 * hour, hour))
        .await
        .unwrap();

    let deleted = maintenance.gc_expired_sessions(now).await.unwrap();
    assert_eq!(deleted, 1);

    assert!(store.find_by_token("tok-live").await.unwrap().is_some());
    assert!(store.find_by_token("tok-dead").await.unwrap().is_none());

    println!("✅ DoD 1: session GC deleted only the expired row");
}

/// DoD 2: Deleting an item orphans its comments; maintenance sweeps them
#[tokio::test]
async fn test_orphaned_comment_sweep_after_item_delete() {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let item_repo = Arc::new(SqliteItemRepository::new(pool.clone()));
    let items = ItemService::new(
        item_repo.clone(),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
    );
    let comments = CommentService::new(
        Arc::new(SqliteCommentRepository::new(pool.clone())),
        item_repo,
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
    );
    let maintenance = SqliteMaintenance::new(pool);

    let couch = items
        .create("seller-1", "couch", 120, "", vec![], "")
        .await
        .unwrap();
    let lamp = items
        .create("seller-1", "lamp", 30, "", vec![], "")
        .await
        .unwrap();
    comments
        .create(&couch.id, "buyer-a", "on the doomed item")
        .await
        .unwrap();
    let kept = comments
        .create(&lamp.id, "buyer-a", "on the surviving item")
        .await
        .unwrap();

    // Item deletion leaves the comment row behind on purpose
    items.delete(&couch.id).await.unwrap();
    let stats = maintenance.get_stats().await.unwrap();
    assert_eq!(stats.comment_count, 2);

    let deleted = maintenance.gc_orphaned_comments().await.unwrap();
    assert_eq!(deleted, 1);

    let thread = comments.list_for_item(&lamp.id).await.unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].id, kept.id);

    println!("✅ DoD 2: orphaned comment swept after item deletion");
}

/// DoD 3: Stats report accurate row counts
#[tokio::test]
async fn test_stats_row_counts() {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let users = SqliteUserRepository::new(pool.clone());
    let items = SqliteItemRepository::new(pool.clone());
    let sessions = SqliteSessionStore::new(pool.clone());
    let comments = SqliteCommentRepository::new(pool.clone());
    let maintenance = SqliteMaintenance::new(pool);

    users
        .insert(&User::new("u-1", "alice", "$argon2-fake", 1000))
        .await
        .unwrap();
    users
        .insert(&User::new("u-2", "bob", "$argon2-fake", 1000))
        .await
        .unwrap();
    items
        .insert(&Item::new("i-1", "u-1", "couch", 120, "", vec![], "", 1000))
        .await
        .unwrap();
    sessions
        .insert(&Session::new("tok-1", "u-1", 1000, 60_000))
        .await
        .unwrap();
    sessions
        .insert(&Session::new("tok-2", "u-1", 1000, 60_000))
        .await
        .unwrap();
    sessions
        .insert(&Session::new("tok-3", "u-2", 1000, 60_000))
        .await
        .unwrap();
    comments
        .insert(&Comment::new("c-1", "i-1", "u-2", "nice", 1000))
        .await
        .unwrap();
    comments
        .insert(&Comment::new("c-2", "i-1", "u-1", "thanks", 1000))
        .await
        .unwrap();

    let stats = maintenance.get_stats().await.unwrap();
    assert_eq!(stats.user_count, 2);
    assert_eq!(stats.item_count, 1);
    assert_eq!(stats.session_count, 3);
    assert_eq!(stats.comment_count, 2);
    assert!(stats.db_size_mb > 0.0);
    assert!(stats.db_size_bytes > 0);
    assert!(stats.fragmentation_percent >= 0.0);

    println!("✅ DoD 3: stats report accurate counts");
}

/// DoD 4: Full maintenance runs GC and VACUUMs once the size cap is hit
#[tokio::test]
async fn test_full_maintenance_with_forced_vacuum() {
    let db_path = "/tmp/tradepost_test_phase4_maintenance.db";
    let _ = std::fs::remove_file(db_path);

    let pool = create_pool(db_path).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let store = SqliteSessionStore::new(pool.clone());
    let maintenance = SqliteMaintenance::new(pool);
    let time_provider = SystemTimeProvider;

    // Seed a pile of sessions that are all long expired
    let now = time_provider.now_millis();
    for i in 0..100 {
        store
            .insert(&Session::new(
                format!("tok-{}", i),
                "alice",
                now - 120_000,
                60_000,
            ))
            .await
            .unwrap();
    }

    // A zero size cap forces the VACUUM branch
    let config = MaintenanceConfig {
        max_db_size_mb: 0.0,
    };
    let stats = maintenance.run_full_maintenance(&config, now).await.unwrap();

    assert_eq!(stats.session_count, 0, "GC must clear every expired session");
    assert!(stats.db_size_mb > 0.0);

    // The default cap (500MB) leaves a tiny DB alone but still GCs
    let stats = maintenance
        .run_full_maintenance(&MaintenanceConfig::default(), now)
        .await
        .unwrap();
    assert_eq!(stats.session_count, 0);

    std::fs::remove_file(db_path).unwrap();
    println!("✅ DoD 4: full maintenance (GC + forced VACUUM) verified");
}

/// DoD 5: The scheduler loop stops promptly on shutdown
#[tokio::test]
async fn test_scheduler_stops_on_shutdown() {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let maintenance: Arc<dyn Maintenance> = Arc::new(SqliteMaintenance::new(pool));
    let scheduler = MaintenanceScheduler::new(
        maintenance.clone(),
        Arc::new(SystemTimeProvider),
        MaintenanceConfig::default(),
        24,
    );

    // Manual trigger works independently of the loop
    let manual = MaintenanceScheduler::new(
        maintenance,
        Arc::new(SystemTimeProvider),
        MaintenanceConfig::default(),
        24,
    );
    manual.run_now().await.unwrap();

    let (sender, token) = shutdown_channel();
    let handle = tokio::spawn(scheduler.run(token));

    sender.shutdown();
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("scheduler must stop within a second")
        .unwrap();

    println!("✅ DoD 5: scheduler stopped promptly on shutdown");
}
