//! RPC Method Handlers
//!
//! Implements the business logic for each JSON-RPC method. Handlers are one
//! impl block split across surface modules: accounts (sessions + users),
//! market (items, claims, ratings), social (posts, comments, friends), admin.
//!
//! Mutating methods resolve the caller's session first and pass through the
//! shared rate limiter; read-only methods skip both unless they need a
//! caller identity (session.current.v1, item.queue_position.v1).

mod accounts;
mod admin;
mod market;
mod social;

use crate::error::{self, to_rpc_error};
use crate::rate_limiter::RateLimiter;
use jsonrpsee::types::ErrorObjectOwned;
use std::sync::Arc;
use tradepost_core::application::{
    ClaimService, CommentService, FriendService, ItemService, PostService, RatingService,
    SessionService, UserService,
};
use tradepost_core::domain::{UserId, DELETED_USER};
use tradepost_core::port::{Maintenance, TimeProvider};

/// Service graph the RPC surface runs against. Assembled by the daemon.
#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<UserService>,
    pub sessions: Arc<SessionService>,
    pub items: Arc<ItemService>,
    pub claims: Arc<ClaimService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    pub ratings: Arc<RatingService>,
    pub friends: Arc<FriendService>,
    pub maintenance: Arc<dyn Maintenance>,
    pub time_provider: Arc<dyn TimeProvider>,
}

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    pub(crate) ctx: AppContext,
    rate_limiter: RateLimiter,
    start_time: std::time::Instant,
}

impl RpcHandler {
    pub fn new(ctx: AppContext) -> Self {
        // Default: 200 burst, 100 req/sec (configurable via env)
        let max_burst: u16 = std::env::var("TRADEPOST_RATE_LIMIT_BURST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(200);

        let rate_per_sec: u32 = std::env::var("TRADEPOST_RATE_LIMIT_RATE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self::with_rate_limit(ctx, max_burst, rate_per_sec)
    }

    pub fn with_rate_limit(ctx: AppContext, burst: u16, refill_per_sec: u32) -> Self {
        Self {
            ctx,
            rate_limiter: RateLimiter::new(burst, refill_per_sec),
            start_time: std::time::Instant::now(),
        }
    }

    /// Gate for mutating methods; THROTTLED when the shared bucket is empty.
    pub(crate) fn throttle(&self) -> Result<(), ErrorObjectOwned> {
        if !self.rate_limiter.try_acquire() {
            return Err(error::throttled());
        }
        Ok(())
    }

    /// Resolve a session token to the calling user's ID.
    pub(crate) async fn caller(&self, session: &str) -> Result<UserId, ErrorObjectOwned> {
        self.ctx
            .sessions
            .resolve(session)
            .await
            .map_err(to_rpc_error)
    }

    /// Display names for a batch of user IDs. Deleted users resolve to the
    /// DELETED_USER placeholder, index-aligned with `ids`.
    pub(crate) async fn display_names(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<String>, ErrorObjectOwned> {
        self.ctx
            .users
            .usernames_for(ids)
            .await
            .map_err(to_rpc_error)
    }

    pub(crate) async fn display_name(&self, id: &UserId) -> Result<String, ErrorObjectOwned> {
        let mut names = self.display_names(std::slice::from_ref(id)).await?;
        Ok(names.pop().unwrap_or_else(|| DELETED_USER.to_string()))
    }

    pub(crate) fn uptime_seconds(&self) -> i64 {
        self.start_time.elapsed().as_secs() as i64
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use tradepost_core::application::DEFAULT_SESSION_TTL_HOURS;
    use tradepost_core::error::Result as AppResult;
    use tradepost_core::port::claim_queue_store::mocks::MemClaimQueueStore;
    use tradepost_core::port::comment_repository::mocks::MemCommentRepository;
    use tradepost_core::port::friend_repository::mocks::MemFriendRepository;
    use tradepost_core::port::id_provider::mocks::SequentialIdProvider;
    use tradepost_core::port::item_repository::mocks::MemItemRepository;
    use tradepost_core::port::password_hasher::mocks::PlainTextHasher;
    use tradepost_core::port::post_repository::mocks::MemPostRepository;
    use tradepost_core::port::rating_repository::mocks::MemRatingRepository;
    use tradepost_core::port::session_store::mocks::MemSessionStore;
    use tradepost_core::port::time_provider::mocks::FixedTimeProvider;
    use tradepost_core::port::user_repository::mocks::MemUserRepository;
    use tradepost_core::port::MaintenanceStats;

    /// Maintenance stub; handler tests never touch a real database.
    pub(crate) struct NoopMaintenance;

    #[async_trait]
    impl Maintenance for NoopMaintenance {
        async fn vacuum(&self) -> AppResult<f64> {
            Ok(0.0)
        }

        async fn gc_expired_sessions(&self, _now_millis: i64) -> AppResult<i64> {
            Ok(0)
        }

        async fn gc_orphaned_comments(&self) -> AppResult<i64> {
            Ok(0)
        }

        async fn get_stats(&self) -> AppResult<MaintenanceStats> {
            Ok(MaintenanceStats {
                db_size_mb: 0.0,
                db_size_bytes: 0,
                user_count: 0,
                item_count: 0,
                session_count: 0,
                comment_count: 0,
                fragmentation_percent: 0.0,
            })
        }
    }

    /// Service graph over in-memory ports with a fixed clock. Claim rows in
    /// the mem store are keyed independently of the item repository, so
    /// items that should accept claims are seeded by ID here.
    pub(crate) fn test_context(claimable_items: &[&str]) -> AppContext {
        let mut claim_rows = MemClaimQueueStore::new();
        for item_id in claimable_items {
            claim_rows = claim_rows.with_item(*item_id, vec![]);
        }

        let user_repo = Arc::new(MemUserRepository::new());
        let session_store = Arc::new(MemSessionStore::new());
        let item_repo = Arc::new(MemItemRepository::new());
        let claim_store = Arc::new(claim_rows);
        let post_repo = Arc::new(MemPostRepository::new());
        let comment_repo = Arc::new(MemCommentRepository::new());
        let rating_repo = Arc::new(MemRatingRepository::new());
        let friend_repo = Arc::new(MemFriendRepository::new());
        let hasher = Arc::new(PlainTextHasher);
        let id_provider = Arc::new(SequentialIdProvider::new("id"));
        let time_provider = Arc::new(FixedTimeProvider::new(1_000));

        AppContext {
            users: Arc::new(UserService::new(
                user_repo,
                session_store.clone(),
                hasher,
                id_provider.clone(),
                time_provider.clone(),
            )),
            sessions: Arc::new(SessionService::new(
                session_store,
                time_provider.clone(),
                DEFAULT_SESSION_TTL_HOURS,
            )),
            items: Arc::new(ItemService::new(
                item_repo.clone(),
                id_provider.clone(),
                time_provider.clone(),
            )),
            claims: Arc::new(ClaimService::new(claim_store)),
            posts: Arc::new(PostService::new(
                post_repo,
                id_provider.clone(),
                time_provider.clone(),
            )),
            comments: Arc::new(CommentService::new(
                comment_repo,
                item_repo.clone(),
                id_provider.clone(),
                time_provider.clone(),
            )),
            ratings: Arc::new(RatingService::new(
                rating_repo,
                item_repo,
                id_provider.clone(),
                time_provider.clone(),
            )),
            friends: Arc::new(FriendService::new(friend_repo, id_provider, time_provider.clone())),
            maintenance: Arc::new(NoopMaintenance),
            time_provider,
        }
    }

    pub(crate) fn test_handler(claimable_items: &[&str]) -> RpcHandler {
        RpcHandler::new(test_context(claimable_items))
    }

    /// Register a user and open a session, returning (user_id, token).
    pub(crate) async fn signed_up(
        handler: &RpcHandler,
        username: &str,
    ) -> (String, String) {
        let user = handler
            .ctx
            .users
            .register(username, "password1")
            .await
            .unwrap();
        let session = handler.ctx.sessions.start(&user.id).await.unwrap();
        (user.id, session.token)
    }

    #[tokio::test]
    async fn test_mutating_methods_share_one_rate_budget() {
        use crate::error::code;
        use crate::types::CreateUserRequest;

        // Two tokens, negligible refill: the third mutation is throttled.
        let handler = RpcHandler::with_rate_limit(test_context(&[]), 2, 1);

        for name in ["mina", "june"] {
            handler
                .create_user(CreateUserRequest {
                    username: name.to_string(),
                    password: "password1".to_string(),
                })
                .await
                .unwrap();
        }

        let err = handler
            .create_user(CreateUserRequest {
                username: "hana".to_string(),
                password: "password1".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), code::THROTTLED);

        // Reads stay open while mutations are throttled
        let users = handler
            .list_users(crate::types::ListUsersRequest {})
            .await
            .unwrap();
        assert_eq!(users.users.len(), 2);
    }
}
