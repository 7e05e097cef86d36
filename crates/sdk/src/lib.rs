//! Tradepost SDK - Rust Client Library
//!
//! Provides a convenient client for the Tradepost marketplace daemon,
//! covering accounts, sessions, item listings and the claim queue.
//!
//! # Example
//!
//! ```no_run
//! use tradepost_sdk::TradepostClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect to the daemon
//!     let client = TradepostClient::connect("http://127.0.0.1:9640").await?;
//!
//!     // Open a session
//!     let login = client.login("june", "password1").await?;
//!
//!     // Queue up for an item
//!     let claim = client.claim(&login.session, "item-123").await?;
//!     println!("Queue position: {}", claim.position);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::TradepostClient;
pub use error::{code, Result, SdkError};
pub use types::{
    ClaimRequest, ClaimResponse, CreateItemRequest, ItemResponse, ItemSummary, ListItemsRequest,
    ListItemsResponse, LoginRequest, LoginResponse, LogoutRequest, LogoutResponse,
    QueueEntry, QueuePositionRequest, QueuePositionResponse, QueueRequest, QueueResponse,
    RegisterRequest, RegisterResponse, UnclaimRequest, UnclaimResponse, UserSummary,
};
