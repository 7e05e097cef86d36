//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results (ADR-020).
//! Responses carry view structs, never domain entities: views resolve
//! user IDs to display names and never expose password hashes.

use serde::{Deserialize, Serialize};
use tradepost_core::domain::friend::FriendRequest;
use tradepost_core::domain::item::Item;
use tradepost_core::domain::post::{Post, PostOptions};
use tradepost_core::domain::rating::Rating;
use tradepost_core::domain::user::User;
use tradepost_core::domain::Comment;

// ---------------------------------------------------------------------------
// Shared views

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub created_at: i64,
}

impl UserView {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub id: String,
    pub seller_id: String,
    pub name: String,
    pub cost: i64,
    pub description: String,
    pub pictures: Vec<String>,
    pub contact: String,
    pub queue_length: u32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ItemView {
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            seller_id: item.seller.clone(),
            name: item.name.clone(),
            cost: item.cost,
            description: item.description.clone(),
            pictures: item.pictures.clone(),
            contact: item.contact.clone(),
            queue_length: item.claim_queue.claimants().len() as u32,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: String,
    pub author_id: String,
    pub author_username: String,
    pub content: String,
    pub options: Option<PostOptions>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl PostView {
    pub fn from_post(post: &Post, author_username: String) -> Self {
        Self {
            id: post.id.clone(),
            author_id: post.author.clone(),
            author_username,
            content: post.content.clone(),
            options: post.options.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: String,
    pub item_id: String,
    pub author_id: String,
    pub author_username: String,
    pub body: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl CommentView {
    pub fn from_comment(comment: &Comment, author_username: String) -> Self {
        Self {
            id: comment.id.clone(),
            item_id: comment.item_id.clone(),
            author_id: comment.author.clone(),
            author_username,
            body: comment.body.clone(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingView {
    pub id: String,
    pub seller_id: String,
    pub item_id: String,
    pub rater_id: String,
    pub score: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl RatingView {
    pub fn from_rating(rating: &Rating) -> Self {
        Self {
            id: rating.id.clone(),
            seller_id: rating.seller.clone(),
            item_id: rating.item_id.clone(),
            rater_id: rating.rater.clone(),
            score: rating.score,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FriendRequestView {
    pub id: String,
    pub from_user_id: String,
    pub from_username: String,
    pub to_user_id: String,
    pub to_username: String,
    pub status: String,
    pub created_at: i64,
}

impl FriendRequestView {
    pub fn from_request(req: &FriendRequest, from_username: String, to_username: String) -> Self {
        Self {
            id: req.id.clone(),
            from_user_id: req.from_user.clone(),
            from_username,
            to_user_id: req.to_user.clone(),
            to_username,
            status: req.status.as_str().to_string(),
            created_at: req.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Sessions

/// session.login.v1 - Authenticate and open a session
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub session: String,
    pub expires_at: i64,
    pub user: UserView,
}

/// session.logout.v1 - End the caller's session
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub session: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
}

/// session.current.v1 - Resolve the session to its user
#[derive(Debug, Deserialize)]
pub struct CurrentSessionRequest {
    pub session: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentSessionResponse {
    pub user: UserView,
}

// ---------------------------------------------------------------------------
// Users

/// user.create.v1 - Register a new account
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateUserResponse {
    pub user: UserView,
}

/// user.list.v1 - List all accounts, oldest first
#[derive(Debug, Deserialize)]
pub struct ListUsersRequest {
    // No parameters needed
}

#[derive(Debug, Clone, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserView>,
}

/// user.get.v1 - Look up an account by username
#[derive(Debug, Deserialize)]
pub struct GetUserRequest {
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetUserResponse {
    pub user: UserView,
}

/// user.update_username.v1 - Rename the caller's account
#[derive(Debug, Deserialize)]
pub struct UpdateUsernameRequest {
    pub session: String,
    pub new_username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateUsernameResponse {
    pub user: UserView,
}

/// user.update_password.v1 - Change the caller's password
#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub session: String,
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatePasswordResponse {
    pub updated: bool,
}

/// user.delete.v1 - Delete the caller's account
#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    pub session: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteUserResponse {
    pub deleted: bool,
}

// ---------------------------------------------------------------------------
// Items

/// item.create.v1 - List an item for sale
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub session: String,
    pub name: String,
    pub cost: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pictures: Vec<String>,
    #[serde(default)]
    pub contact: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemResponse {
    pub item: ItemView,
}

/// item.list.v1 - List items, newest first, optionally by seller
#[derive(Debug, Deserialize)]
pub struct ListItemsRequest {
    #[serde(default)]
    pub seller_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListItemsResponse {
    pub items: Vec<ItemView>,
}

/// item.update.v1 - Edit listing fields, seller only
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub session: String,
    pub item_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cost: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pictures: Option<Vec<String>>,
    #[serde(default)]
    pub contact: Option<String>,
}

/// item.delete.v1 - Remove a listing, seller only
#[derive(Debug, Deserialize)]
pub struct DeleteItemRequest {
    pub session: String,
    pub item_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteItemResponse {
    pub deleted: bool,
}

// ---------------------------------------------------------------------------
// Claim queue

/// item.claim.v1 - Join an item's claim queue
#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub session: String,
    pub item_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClaimResponse {
    pub item_id: String,
    /// 1-based position in the queue after the claim, 0 when absent.
    pub position: u32,
}

/// item.unclaim.v1 - Leave an item's claim queue
#[derive(Debug, Deserialize)]
pub struct UnclaimRequest {
    pub session: String,
    pub item_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnclaimResponse {
    pub item_id: String,
    pub unclaimed: bool,
}

/// item.queue_position.v1 - The caller's position in an item's queue
#[derive(Debug, Deserialize)]
pub struct QueuePositionRequest {
    pub session: String,
    pub item_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueuePositionResponse {
    pub item_id: String,
    /// 1-based position, 0 when the caller is not queued.
    pub position: u32,
}

/// item.queue.v1 - Full claim queue for an item, in claim order
#[derive(Debug, Deserialize)]
pub struct QueueRequest {
    pub item_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueueEntry {
    pub position: u32,
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueueResponse {
    pub item_id: String,
    pub claimants: Vec<QueueEntry>,
}

// ---------------------------------------------------------------------------
// Posts

/// post.create.v1 - Publish a post
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub session: String,
    pub content: String,
    #[serde(default)]
    pub options: Option<PostOptions>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub post: PostView,
}

/// post.list.v1 - List posts, newest first, optionally by author
#[derive(Debug, Deserialize)]
pub struct ListPostsRequest {
    #[serde(default)]
    pub author_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListPostsResponse {
    pub posts: Vec<PostView>,
}

/// post.update.v1 - Edit a post, author only
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub session: String,
    pub post_id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub options: Option<PostOptions>,
}

/// post.delete.v1 - Remove a post, author only
#[derive(Debug, Deserialize)]
pub struct DeletePostRequest {
    pub session: String,
    pub post_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletePostResponse {
    pub deleted: bool,
}

// ---------------------------------------------------------------------------
// Comments

/// comment.create.v1 - Comment on an item
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub session: String,
    pub item_id: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub comment: CommentView,
}

/// comment.list.v1 - List an item's comments, oldest first
#[derive(Debug, Deserialize)]
pub struct ListCommentsRequest {
    pub item_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListCommentsResponse {
    pub comments: Vec<CommentView>,
}

/// comment.update.v1 - Edit a comment, commenter only
#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub session: String,
    pub item_id: String,
    pub comment_id: String,
    pub body: String,
}

/// comment.delete.v1 - Remove a comment, commenter only
#[derive(Debug, Deserialize)]
pub struct DeleteCommentRequest {
    pub session: String,
    pub item_id: String,
    pub comment_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteCommentResponse {
    pub deleted: bool,
}

// ---------------------------------------------------------------------------
// Ratings

/// rating.rate.v1 - Rate an item's seller, once per rater per item
#[derive(Debug, Deserialize)]
pub struct RateItemRequest {
    pub session: String,
    pub item_id: String,
    pub score: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingResponse {
    pub rating: RatingView,
}

/// rating.update.v1 - Revise the caller's rating for an item
#[derive(Debug, Deserialize)]
pub struct UpdateRatingRequest {
    pub session: String,
    pub item_id: String,
    pub score: i32,
}

/// rating.seller.v1 - Average score for a seller across their items
#[derive(Debug, Deserialize)]
pub struct SellerRatingRequest {
    pub seller_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SellerRatingResponse {
    pub seller_id: String,
    /// Mean of all scores, 0.0 when the seller has none.
    pub average: f64,
}

// ---------------------------------------------------------------------------
// Friends

/// friend.send_request.v1 - Ask another user to be friends
#[derive(Debug, Deserialize)]
pub struct SendFriendRequestRequest {
    pub session: String,
    pub to_user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendFriendRequestResponse {
    pub request: FriendRequestView,
}

/// friend.accept.v1 - Accept a pending request sent to the caller
#[derive(Debug, Deserialize)]
pub struct AcceptFriendRequest {
    pub session: String,
    pub from_user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AcceptFriendResponse {
    pub accepted: bool,
}

/// friend.reject.v1 - Reject a pending request sent to the caller
#[derive(Debug, Deserialize)]
pub struct RejectFriendRequest {
    pub session: String,
    pub from_user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectFriendResponse {
    pub rejected: bool,
}

/// friend.remove_request.v1 - Retract a pending request the caller sent
#[derive(Debug, Deserialize)]
pub struct RemoveFriendRequestRequest {
    pub session: String,
    pub to_user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveFriendRequestResponse {
    pub removed: bool,
}

/// friend.remove.v1 - Dissolve an existing friendship
#[derive(Debug, Deserialize)]
pub struct RemoveFriendRequest {
    pub session: String,
    pub friend_user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveFriendResponse {
    pub removed: bool,
}

/// friend.list.v1 - The caller's friends
#[derive(Debug, Deserialize)]
pub struct ListFriendsRequest {
    pub session: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FriendView {
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListFriendsResponse {
    pub friends: Vec<FriendView>,
}

/// friend.requests.v1 - Requests involving the caller, newest first
#[derive(Debug, Deserialize)]
pub struct FriendRequestsRequest {
    pub session: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FriendRequestsResponse {
    pub requests: Vec<FriendRequestView>,
}

// ---------------------------------------------------------------------------
// Admin

/// admin.stats.v1 - Get system statistics
#[derive(Debug, Deserialize)]
pub struct StatsRequest {
    // No parameters needed
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub user_count: i64,
    pub item_count: i64,
    pub session_count: i64,
    pub comment_count: i64,
    pub db_size_bytes: i64,
    pub fragmentation_percent: f64,
    pub uptime_seconds: i64,
}

/// admin.maintenance.v1 - Run manual maintenance
#[derive(Debug, Deserialize)]
pub struct MaintenanceRequest {
    #[serde(default)]
    pub force_vacuum: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceResponse {
    pub vacuum_run: bool,
    pub sessions_deleted: i64,
    pub comments_deleted: i64,
    pub db_size_before: i64,
    pub db_size_after: i64,
}
