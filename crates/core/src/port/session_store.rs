// Session Store Port (Interface)

use crate::domain::Session;
use crate::error::Result;
use async_trait::async_trait;

/// Store interface for session tokens
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, session: &Session) -> Result<()>;

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>>;

    /// Delete one token; false if it did not exist
    async fn delete(&self, token: &str) -> Result<bool>;

    /// Delete every session belonging to a user; returns the count
    async fn delete_for_user(&self, user_id: &str) -> Result<u64>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory session store for service tests
    pub struct MemSessionStore {
        rows: Mutex<HashMap<String, Session>>,
    }

    impl MemSessionStore {
        pub fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
            }
        }

        pub fn session_count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    impl Default for MemSessionStore {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl SessionStore for MemSessionStore {
        async fn insert(&self, session: &Session) -> Result<()> {
            self.rows
                .lock()
                .unwrap()
                .insert(session.token.clone(), session.clone());
            Ok(())
        }

        async fn find_by_token(&self, token: &str) -> Result<Option<Session>> {
            Ok(self.rows.lock().unwrap().get(token).cloned())
        }

        async fn delete(&self, token: &str) -> Result<bool> {
            Ok(self.rows.lock().unwrap().remove(token).is_some())
        }

        async fn delete_for_user(&self, user_id: &str) -> Result<u64> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|_, s| s.user_id != user_id);
            Ok((before - rows.len()) as u64)
        }
    }
}
