// Friend Service - requests and friendships (Phase 3)

use crate::domain::user::UserId;
use crate::domain::{FriendRequest, Friendship};
use crate::error::{AppError, Result};
use crate::port::{FriendRepository, IdProvider, TimeProvider};
use std::sync::Arc;
use tracing::debug;

/// Friend graph use cases. Requests are directional; friendships are not.
/// Resolved requests stay around as history, only a PENDING row blocks a
/// new request.
pub struct FriendService {
    friend_repo: Arc<dyn FriendRepository>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl FriendService {
    pub fn new(
        friend_repo: Arc<dyn FriendRepository>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            friend_repo,
            id_provider,
            time_provider,
        }
    }

    /// Send a friend request from `from` to `to`.
    pub async fn send_request(&self, from: &str, to: &str) -> Result<FriendRequest> {
        if from == to {
            return Err(AppError::Validation(
                "cannot send a friend request to yourself".to_string(),
            ));
        }
        if self.friend_repo.friendship_exists(from, to).await? {
            return Err(AppError::Conflict("users are already friends".to_string()));
        }
        if self
            .friend_repo
            .find_pending_between(from, to)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "a friend request between these users is already pending".to_string(),
            ));
        }

        let request = FriendRequest::new(
            self.id_provider.generate_id(),
            from,
            to,
            self.time_provider.now_millis(),
        );
        self.friend_repo.insert_request(&request).await?;
        debug!(from, to, "friend request sent");
        Ok(request)
    }

    /// Accept the pending request `from` sent to `to`; records the
    /// friendship.
    pub async fn accept_request(&self, from: &str, to: &str) -> Result<()> {
        let mut request = self.pending_from_to(from, to).await?;
        let now = self.time_provider.now_millis();

        request.accept(now)?;
        self.friend_repo.update_request(&request).await?;
        self.friend_repo
            .insert_friendship(&Friendship::new(from, to, now))
            .await?;
        Ok(())
    }

    /// Reject the pending request `from` sent to `to`. A rejected request
    /// does not block a fresh one later.
    pub async fn reject_request(&self, from: &str, to: &str) -> Result<()> {
        let mut request = self.pending_from_to(from, to).await?;
        request.reject(self.time_provider.now_millis())?;
        self.friend_repo.update_request(&request).await?;
        Ok(())
    }

    /// Retract one's own pending request before the recipient acts on it.
    pub async fn remove_request(&self, from: &str, to: &str) -> Result<()> {
        let request = self.pending_from_to(from, to).await?;
        self.friend_repo.delete_request(&request.id).await
    }

    /// Unfriend. NotFound if the pair was never friends.
    pub async fn remove_friend(&self, user: &str, friend: &str) -> Result<()> {
        if !self.friend_repo.delete_friendship(user, friend).await? {
            return Err(AppError::NotFound(format!(
                "{} and {} are not friends",
                user, friend
            )));
        }
        Ok(())
    }

    pub async fn list_friends(&self, user: &str) -> Result<Vec<UserId>> {
        self.friend_repo.list_friends_of(user).await
    }

    /// Every request involving the user, sent or received, any status.
    pub async fn list_requests(&self, user: &str) -> Result<Vec<FriendRequest>> {
        self.friend_repo.list_requests_for(user).await
    }

    async fn pending_from_to(&self, from: &str, to: &str) -> Result<FriendRequest> {
        self.friend_repo
            .find_pending_from_to(from, to)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("no pending friend request from {} to {}", from, to))
            })
    }
}
