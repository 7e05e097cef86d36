// Session Service - token issue/resolve/revoke (Phase 1, ADR-033)

use crate::domain::{Session, UserId};
use crate::error::{AppError, Result};
use crate::port::{SessionStore, TimeProvider};
use rand::RngCore;
use std::sync::Arc;
use tracing::debug;

/// Default session lifetime: 14 days
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 14 * 24;

const TOKEN_BYTES: usize = 32;

/// Session use cases. Tokens are opaque 64-char hex strings; expiry is
/// checked on every resolve, and expired rows are dropped lazily there
/// (maintenance sweeps the rest).
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    time_provider: Arc<dyn TimeProvider>,
    ttl_ms: i64,
}

impl SessionService {
    pub fn new(
        store: Arc<dyn SessionStore>,
        time_provider: Arc<dyn TimeProvider>,
        ttl_hours: i64,
    ) -> Self {
        Self {
            store,
            time_provider,
            ttl_ms: ttl_hours * 3600 * 1000,
        }
    }

    /// Issue a fresh session for an already-authenticated user.
    pub async fn start(&self, user_id: &str) -> Result<Session> {
        let session = Session::new(
            generate_token(),
            user_id,
            self.time_provider.now_millis(),
            self.ttl_ms,
        );
        self.store.insert(&session).await?;
        debug!(user_id, expires_at = session.expires_at, "session started");
        Ok(session)
    }

    /// Resolve a token to its user. Unknown and expired tokens both fail
    /// Unauthenticated; an expired row is deleted on the way out.
    pub async fn resolve(&self, token: &str) -> Result<UserId> {
        let session = match self.store.find_by_token(token).await? {
            Some(session) => session,
            None => return Err(AppError::session_invalid()),
        };
        if session.is_expired(self.time_provider.now_millis()) {
            self.store.delete(token).await?;
            return Err(AppError::session_invalid());
        }
        Ok(session.user_id)
    }

    /// End one session. Ending an unknown token is a no-op (logout must
    /// not fail on a stale client).
    pub async fn end(&self, token: &str) -> Result<()> {
        if !self.store.delete(token).await? {
            debug!("logout for unknown token ignored");
        }
        Ok(())
    }

    /// End every session a user holds; returns the count.
    pub async fn end_all_for(&self, user_id: &str) -> Result<u64> {
        self.store.delete_for_user(user_id).await
    }
}

/// 32 random bytes, hex-encoded
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    let mut token = String::with_capacity(TOKEN_BYTES * 2);
    for byte in bytes {
        token.push_str(&format!("{:02x}", byte));
    }
    token
}
