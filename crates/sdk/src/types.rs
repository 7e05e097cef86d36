//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from the api-rpc crate. The SDK covers the
//! account and item surfaces; posts, comments, ratings and friends go
//! through raw JSON-RPC for now.

use serde::{Deserialize, Serialize};

/// Account fields returned by the daemon
#[derive(Debug, Clone, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub created_at: i64,
}

/// Listing fields returned by the daemon
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSummary {
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

/// Request to create an account
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Response from account creation
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub user: UserSummary,
}

/// Request to open a session
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response from login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Session token to pass to authenticated calls
    pub session: String,
    pub expires_at: i64,
    pub user: UserSummary,
}

/// Request to end a session
#[derive(Debug, Clone, Serialize)]
pub struct LogoutRequest {
    pub session: String,
}

/// Response from logout
#[derive(Debug, Clone, Deserialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
}

/// Request to list items for sale
#[derive(Debug, Clone, Serialize)]
pub struct ListItemsRequest {
    /// Restrict to one seller's listings
    pub seller_id: Option<String>,
}

/// Response from item listing
#[derive(Debug, Clone, Deserialize)]
pub struct ListItemsResponse {
    pub items: Vec<ItemSummary>,
}

/// Request to put an item up for sale
#[derive(Debug, Clone, Serialize)]
pub struct CreateItemRequest {
    pub session: String,
    pub name: String,
    pub cost: i64,
    pub description: String,
    pub pictures: Vec<String>,
    pub contact: String,
}

/// Response carrying a single item
#[derive(Debug, Clone, Deserialize)]
pub struct ItemResponse {
    pub item: ItemSummary,
}

/// Request to join an item's claim queue
#[derive(Debug, Clone, Serialize)]
pub struct ClaimRequest {
    pub session: String,
    pub item_id: String,
}

/// Response from a claim
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimResponse {
    pub item_id: String,
    /// 1-based position in the queue, 0 when absent
    pub position: u32,
}

/// Request to leave an item's claim queue
#[derive(Debug, Clone, Serialize)]
pub struct UnclaimRequest {
    pub session: String,
    pub item_id: String,
}

/// Response from an unclaim
#[derive(Debug, Clone, Deserialize)]
pub struct UnclaimResponse {
    pub item_id: String,
    /// False when the caller was not queued to begin with
    pub unclaimed: bool,
}

/// Request for the caller's queue position
#[derive(Debug, Clone, Serialize)]
pub struct QueuePositionRequest {
    pub session: String,
    pub item_id: String,
}

/// Response carrying the caller's queue position
#[derive(Debug, Clone, Deserialize)]
pub struct QueuePositionResponse {
    pub item_id: String,
    /// 1-based position, 0 when the caller is not queued
    pub position: u32,
}

/// Request for an item's full claim queue
#[derive(Debug, Clone, Serialize)]
pub struct QueueRequest {
    pub item_id: String,
}

/// One claimant in a queue view
#[derive(Debug, Clone, Deserialize)]
pub struct QueueEntry {
    pub position: u32,
    pub user_id: String,
    pub username: String,
}

/// Response carrying an item's claim queue in claim order
#[derive(Debug, Clone, Deserialize)]
pub struct QueueResponse {
    pub item_id: String,
    pub claimants: Vec<QueueEntry>,
}
