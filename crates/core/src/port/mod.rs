// Port Layer - Interfaces for external dependencies

pub mod claim_queue_store; // Phase 2
pub mod comment_repository;
pub mod friend_repository;
pub mod id_provider; // For deterministic testing
pub mod item_repository;
pub mod maintenance; // Phase 4
pub mod password_hasher;
pub mod post_repository;
pub mod rating_repository;
pub mod session_store;
pub mod time_provider;
pub mod user_repository;

// Re-exports
pub use claim_queue_store::{ClaimQueueStore, QueueSnapshot, ReplaceOutcome};
pub use comment_repository::CommentRepository;
pub use friend_repository::FriendRepository;
pub use id_provider::IdProvider;
pub use item_repository::ItemRepository;
pub use maintenance::{Maintenance, MaintenanceConfig, MaintenanceStats};
pub use password_hasher::PasswordHasher;
pub use post_repository::PostRepository;
pub use rating_repository::RatingRepository;
pub use session_store::SessionStore;
pub use time_provider::TimeProvider;
pub use user_repository::UserRepository;
