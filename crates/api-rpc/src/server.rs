//! JSON-RPC Server
//!
//! Binds the method table to a localhost TCP listener. jsonrpsee serves
//! JSON-RPC 2.0 over HTTP and WebSocket on the same port.

use crate::handler::{AppContext, RpcHandler};
use crate::types::{
    AcceptFriendRequest, ClaimRequest, CreateCommentRequest, CreateItemRequest, CreatePostRequest,
    CreateUserRequest, CurrentSessionRequest, DeleteCommentRequest, DeleteItemRequest,
    DeletePostRequest, DeleteUserRequest, FriendRequestsRequest, GetUserRequest,
    ListCommentsRequest, ListFriendsRequest, ListItemsRequest, ListPostsRequest, ListUsersRequest,
    LoginRequest, LogoutRequest, MaintenanceRequest, QueuePositionRequest, QueueRequest,
    RateItemRequest, RejectFriendRequest, RemoveFriendRequest, RemoveFriendRequestRequest,
    SellerRatingRequest, SendFriendRequestRequest, StatsRequest, UnclaimRequest,
    UpdateCommentRequest, UpdateItemRequest, UpdatePasswordRequest, UpdatePostRequest,
    UpdateRatingRequest, UpdateUsernameRequest,
};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

// ADR-020: RPC Server Configuration
// Binds to 127.0.0.1 only; the daemon is not meant to face the network.
const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9640;

/// Errors raised while bringing the server up.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind rpc listener on {addr}: {reason}")]
    Bind { addr: String, reason: String },
    #[error("failed to register rpc method {method}: {reason}")]
    Register { method: String, reason: String },
}

/// RPC Server Configuration
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

// One entry per method: name, request DTO, handler fn. Keeps the method
// table readable at this size; each expansion is the same clone-the-handler
// closure jsonrpsee expects.
macro_rules! register_method {
    ($module:expr, $handler:expr, $name:literal, $req:ty, $method:ident) => {{
        let handler = $handler.clone();
        $module
            .register_async_method($name, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: $req = params.parse()?;
                    handler.$method(req).await
                }
            })
            .map_err(|e| ServerError::Register {
                method: $name.to_string(),
                reason: e.to_string(),
            })?;
    }};
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, ctx: AppContext) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(ctx)),
        }
    }

    /// Start the JSON-RPC server
    ///
    /// Security: only binds to 127.0.0.1 (no external access)
    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server on TCP (localhost only)"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| ServerError::Bind {
                addr: addr.clone(),
                reason: e.to_string(),
            })?;

        let mut module = RpcModule::new(());
        let h = &self.handler;

        // Sessions
        register_method!(module, h, "session.login.v1", LoginRequest, login);
        register_method!(module, h, "session.logout.v1", LogoutRequest, logout);
        register_method!(
            module,
            h,
            "session.current.v1",
            CurrentSessionRequest,
            current_session
        );

        // Users
        register_method!(module, h, "user.create.v1", CreateUserRequest, create_user);
        register_method!(module, h, "user.list.v1", ListUsersRequest, list_users);
        register_method!(module, h, "user.get.v1", GetUserRequest, get_user);
        register_method!(
            module,
            h,
            "user.update_username.v1",
            UpdateUsernameRequest,
            update_username
        );
        register_method!(
            module,
            h,
            "user.update_password.v1",
            UpdatePasswordRequest,
            update_password
        );
        register_method!(module, h, "user.delete.v1", DeleteUserRequest, delete_user);

        // Items
        register_method!(module, h, "item.create.v1", CreateItemRequest, create_item);
        register_method!(module, h, "item.list.v1", ListItemsRequest, list_items);
        register_method!(module, h, "item.update.v1", UpdateItemRequest, update_item);
        register_method!(module, h, "item.delete.v1", DeleteItemRequest, delete_item);

        // Claim queue (ADR-009)
        register_method!(module, h, "item.claim.v1", ClaimRequest, claim);
        register_method!(module, h, "item.unclaim.v1", UnclaimRequest, unclaim);
        register_method!(
            module,
            h,
            "item.queue_position.v1",
            QueuePositionRequest,
            queue_position
        );
        register_method!(module, h, "item.queue.v1", QueueRequest, queue);

        // Posts
        register_method!(module, h, "post.create.v1", CreatePostRequest, create_post);
        register_method!(module, h, "post.list.v1", ListPostsRequest, list_posts);
        register_method!(module, h, "post.update.v1", UpdatePostRequest, update_post);
        register_method!(module, h, "post.delete.v1", DeletePostRequest, delete_post);

        // Comments
        register_method!(
            module,
            h,
            "comment.create.v1",
            CreateCommentRequest,
            create_comment
        );
        register_method!(
            module,
            h,
            "comment.list.v1",
            ListCommentsRequest,
            list_comments
        );
        register_method!(
            module,
            h,
            "comment.update.v1",
            UpdateCommentRequest,
            update_comment
        );
        register_method!(
            module,
            h,
            "comment.delete.v1",
            DeleteCommentRequest,
            delete_comment
        );

        // Ratings
        register_method!(module, h, "rating.rate.v1", RateItemRequest, rate_item);
        register_method!(
            module,
            h,
            "rating.update.v1",
            UpdateRatingRequest,
            update_rating
        );
        register_method!(
            module,
            h,
            "rating.seller.v1",
            SellerRatingRequest,
            seller_rating
        );

        // Friends
        register_method!(
            module,
            h,
            "friend.send_request.v1",
            SendFriendRequestRequest,
            send_friend_request
        );
        register_method!(
            module,
            h,
            "friend.accept.v1",
            AcceptFriendRequest,
            accept_friend_request
        );
        register_method!(
            module,
            h,
            "friend.reject.v1",
            RejectFriendRequest,
            reject_friend_request
        );
        register_method!(
            module,
            h,
            "friend.remove_request.v1",
            RemoveFriendRequestRequest,
            remove_friend_request
        );
        register_method!(
            module,
            h,
            "friend.remove.v1",
            RemoveFriendRequest,
            remove_friend
        );
        register_method!(module, h, "friend.list.v1", ListFriendsRequest, list_friends);
        register_method!(
            module,
            h,
            "friend.requests.v1",
            FriendRequestsRequest,
            list_friend_requests
        );

        // Admin APIs (Phase 4)
        register_method!(module, h, "admin.stats.v1", StatsRequest, stats);
        register_method!(
            module,
            h,
            "admin.maintenance.v1",
            MaintenanceRequest,
            run_maintenance
        );

        info!(methods = module.method_names().count(), "JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok(handle)
    }
}
