// Session Domain Model (Phase 1)

use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Opaque session token (32 random bytes, hex-encoded)
pub type SessionToken = String;

/// Session Entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: UserId,
    pub created_at: i64, // epoch ms
    pub expires_at: i64,
}

impl Session {
    pub fn new(
        token: impl Into<String>,
        user_id: impl Into<String>,
        created_at: i64,
        ttl_ms: i64,
    ) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
            created_at,
            expires_at: created_at + ttl_ms,
        }
    }

    pub fn is_expired(&self, now_millis: i64) -> bool {
        now_millis >= self.expires_at
    }
}
