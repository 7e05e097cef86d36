// Tradepost Infrastructure - SQLite Adapter
// Implements: UserRepository, SessionStore, ItemRepository, ClaimQueueStore
// (ADR-009), PostRepository, CommentRepository, RatingRepository,
// FriendRepository, Maintenance (Phase 4)

mod comment_repository;
mod connection;
mod error;
mod friend_repository;
mod item_repository;
mod maintenance_impl;
mod migration;
mod post_repository;
mod rating_repository;
mod session_store;
mod user_repository;

pub use comment_repository::SqliteCommentRepository;
pub use connection::create_pool;
pub use friend_repository::SqliteFriendRepository;
pub use item_repository::SqliteItemRepository;
pub use maintenance_impl::SqliteMaintenance;
pub use migration::run_migrations;
pub use post_repository::SqlitePostRepository;
pub use rating_repository::SqliteRatingRepository;
pub use session_store::SqliteSessionStore;
pub use user_repository::SqliteUserRepository;

// Note: sqlx::Error conversion is handled by the map_sqlx_error helper
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
