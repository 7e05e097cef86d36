// User Repository Port (Interface)

use crate::domain::User;
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for User persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user (Conflict on duplicate username)
    async fn insert(&self, user: &User) -> Result<()>;

    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Find user by username (exact match)
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// All users, oldest first
    async fn list(&self) -> Result<Vec<User>>;

    /// Persist username/password_hash/updated_at changes (NotFound if gone)
    async fn update(&self, user: &User) -> Result<()>;

    /// Delete a user row (NotFound if gone)
    async fn delete(&self, id: &str) -> Result<()>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory user repository for service tests
    pub struct MemUserRepository {
        rows: Mutex<HashMap<String, User>>,
    }

    impl MemUserRepository {
        pub fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
            }
        }
    }

    impl Default for MemUserRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl UserRepository for MemUserRepository {
        async fn insert(&self, user: &User) -> Result<()> {
            let mut rows = self.rows.lock().unwrap();
            if rows.values().any(|u| u.username == user.username) {
                return Err(AppError::Conflict(format!(
                    "username {} already taken",
                    user.username
                )));
            }
            rows.insert(user.id.clone(), user.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
            Ok(self.rows.lock().unwrap().get(id).cloned())
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn list(&self) -> Result<Vec<User>> {
            let mut users: Vec<User> = self.rows.lock().unwrap().values().cloned().collect();
            users.sort_by_key(|u| u.created_at);
            Ok(users)
        }

        async fn update(&self, user: &User) -> Result<()> {
            let mut rows = self.rows.lock().unwrap();
            if rows
                .values()
                .any(|u| u.id != user.id && u.username == user.username)
            {
                return Err(AppError::Conflict(format!(
                    "username {} already taken",
                    user.username
                )));
            }
            match rows.get_mut(&user.id) {
                Some(row) => {
                    *row = user.clone();
                    Ok(())
                }
                None => Err(AppError::user_not_found(&user.id)),
            }
        }

        async fn delete(&self, id: &str) -> Result<()> {
            match self.rows.lock().unwrap().remove(id) {
                Some(_) => Ok(()),
                None => Err(AppError::user_not_found(id)),
            }
        }
    }
}
