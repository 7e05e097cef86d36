// Friend Repository Port (Interface)

use crate::domain::user::UserId;
use crate::domain::{FriendRequest, Friendship};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for friend requests and friendships.
///
/// Friendships are stored once per pair; every pair query matches both
/// directions.
#[async_trait]
pub trait FriendRepository: Send + Sync {
    async fn insert_request(&self, request: &FriendRequest) -> Result<()>;

    /// The pending request sent by `from` to `to`, if any (directional)
    async fn find_pending_from_to(&self, from: &str, to: &str) -> Result<Option<FriendRequest>>;

    /// Any pending request between the two users, either direction
    async fn find_pending_between(&self, a: &str, b: &str) -> Result<Option<FriendRequest>>;

    /// Every request involving the user (sent or received, any status),
    /// newest first
    async fn list_requests_for(&self, user: &str) -> Result<Vec<FriendRequest>>;

    /// Persist a status transition (NotFound if gone)
    async fn update_request(&self, request: &FriendRequest) -> Result<()>;

    /// Delete a request row (NotFound if gone)
    async fn delete_request(&self, id: &str) -> Result<()>;

    async fn insert_friendship(&self, friendship: &Friendship) -> Result<()>;

    async fn friendship_exists(&self, a: &str, b: &str) -> Result<bool>;

    /// Delete the pair's friendship; false if they were not friends
    async fn delete_friendship(&self, a: &str, b: &str) -> Result<bool>;

    /// The user's friends (other side of each friendship row)
    async fn list_friends_of(&self, user: &str) -> Result<Vec<UserId>>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::domain::RequestStatus;
    use crate::error::AppError;
    use std::sync::Mutex;

    /// In-memory friend repository for service tests
    pub struct MemFriendRepository {
        requests: Mutex<Vec<FriendRequest>>,
        friendships: Mutex<Vec<Friendship>>,
    }

    impl MemFriendRepository {
        pub fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                friendships: Mutex::new(Vec::new()),
            }
        }
    }

    impl Default for MemFriendRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl FriendRepository for MemFriendRepository {
        async fn insert_request(&self, request: &FriendRequest) -> Result<()> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(())
        }

        async fn find_pending_from_to(
            &self,
            from: &str,
            to: &str,
        ) -> Result<Option<FriendRequest>> {
            Ok(self
                .requests
                .lock()
                .unwrap()
                .iter()
                .find(|r| {
                    r.status == RequestStatus::Pending && r.from_user == from && r.to_user == to
                })
                .cloned())
        }

        async fn find_pending_between(&self, a: &str, b: &str) -> Result<Option<FriendRequest>> {
            Ok(self
                .requests
                .lock()
                .unwrap()
                .iter()
                .find(|r| {
                    r.status == RequestStatus::Pending
                        && ((r.from_user == a && r.to_user == b)
                            || (r.from_user == b && r.to_user == a))
                })
                .cloned())
        }

        async fn list_requests_for(&self, user: &str) -> Result<Vec<FriendRequest>> {
            let mut requests: Vec<FriendRequest> = self
                .requests
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.from_user == user || r.to_user == user)
                .cloned()
                .collect();
            requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(requests)
        }

        async fn update_request(&self, request: &FriendRequest) -> Result<()> {
            let mut requests = self.requests.lock().unwrap();
            match requests.iter_mut().find(|r| r.id == request.id) {
                Some(row) => {
                    *row = request.clone();
                    Ok(())
                }
                None => Err(AppError::NotFound(format!(
                    "friend request {} not found",
                    request.id
                ))),
            }
        }

        async fn delete_request(&self, id: &str) -> Result<()> {
            let mut requests = self.requests.lock().unwrap();
            let before = requests.len();
            requests.retain(|r| r.id != id);
            if requests.len() == before {
                return Err(AppError::NotFound(format!(
                    "friend request {} not found",
                    id
                )));
            }
            Ok(())
        }

        async fn insert_friendship(&self, friendship: &Friendship) -> Result<()> {
            self.friendships.lock().unwrap().push(friendship.clone());
            Ok(())
        }

        async fn friendship_exists(&self, a: &str, b: &str) -> Result<bool> {
            Ok(self
                .friendships
                .lock()
                .unwrap()
                .iter()
                .any(|f| f.involves(a) && f.involves(b)))
        }

        async fn delete_friendship(&self, a: &str, b: &str) -> Result<bool> {
            let mut friendships = self.friendships.lock().unwrap();
            let before = friendships.len();
            friendships.retain(|f| !(f.involves(a) && f.involves(b)));
            Ok(friendships.len() != before)
        }

        async fn list_friends_of(&self, user: &str) -> Result<Vec<UserId>> {
            Ok(self
                .friendships
                .lock()
                .unwrap()
                .iter()
                .filter_map(|f| f.other(user).cloned())
                .collect())
        }
    }
}
