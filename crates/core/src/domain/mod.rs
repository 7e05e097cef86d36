// Domain Layer - Pure business logic and entities

pub mod claim_queue;
pub mod comment;
pub mod error;
pub mod friend;
pub mod item;
pub mod post;
pub mod rating;
pub mod session;
pub mod user;

// Re-exports
pub use claim_queue::ClaimQueue;
pub use comment::{Comment, CommentId};
pub use error::DomainError;
pub use friend::{FriendRequest, Friendship, RequestId, RequestStatus};
pub use item::{Item, ItemId, ItemUpdate};
pub use post::{Post, PostId, PostOptions};
pub use rating::{Rating, RatingId};
pub use session::{Session, SessionToken};
pub use user::{User, UserId, DELETED_USER};
