//! Tradepost Daemon - Main Entry Point
//! Phase 1: MVP with JSON-RPC server; Phase 4: scheduled maintenance

mod telemetry;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

// Import workspace crates
use tradepost_api_rpc::{AppContext, RpcServer, RpcServerConfig};
use tradepost_core::application::{
    shutdown_channel, ClaimService, CommentService, FriendService, ItemService,
    MaintenanceScheduler, PostService, RatingService, SessionService, UserService,
    DEFAULT_SESSION_TTL_HOURS,
};
use tradepost_core::port::id_provider::UuidProvider;
use tradepost_core::port::password_hasher::Argon2PasswordHasher;
use tradepost_core::port::time_provider::SystemTimeProvider;
use tradepost_core::port::MaintenanceConfig; // Phase 4
use tradepost_infra_sqlite::{
    create_pool, run_migrations, SqliteCommentRepository, SqliteFriendRepository,
    SqliteItemRepository, SqliteMaintenance, SqlitePostRepository, SqliteRatingRepository,
    SqliteSessionStore, SqliteUserRepository,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_DB_PATH: &str = "~/.tradepost/tradepost.db";

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging (JSON format + optional OTLP export - ADR-050)
    telemetry::init_logging()?;

    info!("Tradepost v{} starting...", VERSION);

    // 2. Load configuration
    let db_path = std::env::var("TRADEPOST_DB_PATH")
        .map(|p| shellexpand::tilde(&p).into_owned())
        .unwrap_or_else(|_| shellexpand::tilde(DEFAULT_DB_PATH).into_owned());

    let rpc_port: Option<u16> = std::env::var("TRADEPOST_RPC_PORT")
        .ok()
        .and_then(|s| s.parse().ok());

    let session_ttl_hours: i64 = std::env::var("TRADEPOST_SESSION_TTL_HOURS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SESSION_TTL_HOURS);

    info!(db_path = %db_path, "Initializing database...");

    // 3. Initialize database
    let pool = create_pool(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let id_provider = Arc::new(UuidProvider);
    let password_hasher = Arc::new(Argon2PasswordHasher);

    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
    let session_store = Arc::new(SqliteSessionStore::new(pool.clone()));
    // Items and their claim queues share one table; this repository serves
    // both the ItemRepository and ClaimQueueStore ports.
    let item_repo = Arc::new(SqliteItemRepository::new(pool.clone()));
    let post_repo = Arc::new(SqlitePostRepository::new(pool.clone()));
    let comment_repo = Arc::new(SqliteCommentRepository::new(pool.clone()));
    let rating_repo = Arc::new(SqliteRatingRepository::new(pool.clone()));
    let friend_repo = Arc::new(SqliteFriendRepository::new(pool.clone()));
    let maintenance = Arc::new(SqliteMaintenance::new(pool.clone()));

    // 5. Application services
    let users = Arc::new(UserService::new(
        user_repo,
        session_store.clone(),
        password_hasher,
        id_provider.clone(),
        time_provider.clone(),
    ));
    let sessions = Arc::new(SessionService::new(
        session_store,
        time_provider.clone(),
        session_ttl_hours,
    ));
    let items = Arc::new(ItemService::new(
        item_repo.clone(),
        id_provider.clone(),
        time_provider.clone(),
    ));
    let claims = Arc::new(ClaimService::new(item_repo.clone()));
    let posts = Arc::new(PostService::new(
        post_repo,
        id_provider.clone(),
        time_provider.clone(),
    ));
    let comments = Arc::new(CommentService::new(
        comment_repo,
        item_repo.clone(),
        id_provider.clone(),
        time_provider.clone(),
    ));
    let ratings = Arc::new(RatingService::new(
        rating_repo,
        item_repo,
        id_provider.clone(),
        time_provider.clone(),
    ));
    let friends = Arc::new(FriendService::new(
        friend_repo,
        id_provider,
        time_provider.clone(),
    ));

    let ctx = AppContext {
        users,
        sessions,
        items,
        claims,
        posts,
        comments,
        ratings,
        friends,
        maintenance: maintenance.clone(),
        time_provider: time_provider.clone(),
    };

    // 6. Start JSON-RPC server
    info!("Starting JSON-RPC server...");
    let rpc_config = match rpc_port {
        Some(port) => RpcServerConfig {
            port,
            ..Default::default()
        },
        None => RpcServerConfig::default(),
    };
    let rpc_server = RpcServer::new(rpc_config, ctx);
    let rpc_handle = rpc_server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    // 7. Start Maintenance Scheduler (Phase 4)
    info!("Starting maintenance scheduler...");
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let maintenance_scheduler = MaintenanceScheduler::new(
        maintenance,
        time_provider,
        MaintenanceConfig::default(), // 500MB VACUUM threshold
        24,                           // Run every 24 hours
    );
    let scheduler_handle = tokio::spawn(maintenance_scheduler.run(shutdown_rx));

    info!("✅ System ready. Serving JSON-RPC on localhost");
    info!("Press Ctrl+C to shutdown");

    // 8. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 9. Graceful shutdown
    shutdown_tx.shutdown();
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), scheduler_handle).await;

    info!("Shutdown complete.");

    Ok(())
}
