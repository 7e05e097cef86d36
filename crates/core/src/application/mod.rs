// Application Layer - Use Cases and Business Logic

pub mod claims; // Phase 2
pub mod comments; // Phase 3
pub mod friends; // Phase 3
pub mod items;
pub mod maintenance; // Phase 4
pub mod posts; // Phase 3
pub mod ratings; // Phase 3
pub mod sessions;
pub mod shutdown;
pub mod users;

// Re-exports
pub use claims::ClaimService;
pub use comments::CommentService;
pub use friends::FriendService;
pub use items::ItemService;
pub use maintenance::MaintenanceScheduler;
pub use posts::PostService;
pub use ratings::RatingService;
pub use sessions::{SessionService, DEFAULT_SESSION_TTL_HOURS};
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
pub use users::UserService;
