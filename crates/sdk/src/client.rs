//! Tradepost Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    ClaimRequest, ClaimResponse, CreateItemRequest, ItemResponse, ListItemsRequest,
    ListItemsResponse, LoginRequest, LoginResponse, LogoutRequest, LogoutResponse, QueuePositionRequest,
    QueuePositionResponse, QueueRequest, QueueResponse, RegisterRequest, RegisterResponse,
    UnclaimRequest, UnclaimResponse,
};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::traits::ToRpcParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use serde::Serialize;
use serde_json::value::RawValue;
use std::time::Duration;

// The daemon parses params by name, so each request struct is sent as the
// params object itself rather than wrapped in a positional array.
struct NamedParams<T>(T);

impl<T: Serialize> ToRpcParams for NamedParams<T> {
    fn to_rpc_params(self) -> std::result::Result<Option<Box<RawValue>>, serde_json::Error> {
        serde_json::value::to_raw_value(&self.0).map(Some)
    }
}

/// Tradepost Client
///
/// Provides a high-level interface to the Tradepost daemon. Covers accounts,
/// sessions, item listings and the claim queue.
///
/// # Example
///
/// ```no_run
/// use tradepost_sdk::TradepostClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = TradepostClient::connect("http://127.0.0.1:9640").await?;
/// # Ok(())
/// # }
/// ```
pub struct TradepostClient {
    client: HttpClient,
}

impl TradepostClient {
    /// Connect to the Tradepost daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9640`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Create an account
    pub async fn register(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<RegisterResponse> {
        let request = RegisterRequest {
            username: username.into(),
            password: password.into(),
        };
        let response = self
            .client
            .request("user.create.v1", NamedParams(request))
            .await?;

        Ok(response)
    }

    /// Open a session
    ///
    /// The returned token authenticates subsequent calls until it expires
    /// or `logout` is called.
    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<LoginResponse> {
        let request = LoginRequest {
            username: username.into(),
            password: password.into(),
        };
        let response = self
            .client
            .request("session.login.v1", NamedParams(request))
            .await?;

        Ok(response)
    }

    /// End a session
    pub async fn logout(&self, session: impl Into<String>) -> Result<LogoutResponse> {
        let request = LogoutRequest {
            session: session.into(),
        };
        let response = self
            .client
            .request("session.logout.v1", NamedParams(request))
            .await?;

        Ok(response)
    }

    /// List items for sale, newest first
    ///
    /// # Arguments
    ///
    /// * `seller_id` - restrict to one seller's listings
    pub async fn list_items(&self, seller_id: Option<&str>) -> Result<ListItemsResponse> {
        let request = ListItemsRequest {
            seller_id: seller_id.map(str::to_string),
        };
        let response = self
            .client
            .request("item.list.v1", NamedParams(request))
            .await?;

        Ok(response)
    }

    /// Put an item up for sale
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use tradepost_sdk::{TradepostClient, CreateItemRequest};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = TradepostClient::connect("http://127.0.0.1:9640").await?;
    /// # let session = "token".to_string();
    /// let response = client.create_item(CreateItemRequest {
    ///     session,
    ///     name: "Road bike".to_string(),
    ///     cost: 250,
    ///     description: "Light frame, recently serviced".to_string(),
    ///     pictures: vec![],
    ///     contact: "june@example.com".to_string(),
    /// }).await?;
    ///
    /// println!("Item ID: {}", response.item.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_item(&self, request: CreateItemRequest) -> Result<ItemResponse> {
        let response = self
            .client
            .request("item.create.v1", NamedParams(request))
            .await?;

        Ok(response)
    }

    /// Join an item's claim queue
    ///
    /// Claiming twice is harmless; the position already held is returned.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use tradepost_sdk::TradepostClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = TradepostClient::connect("http://127.0.0.1:9640").await?;
    /// # let session = "token".to_string();
    /// let response = client.claim(&session, "item-123").await?;
    /// println!("Queue position: {}", response.position);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn claim(
        &self,
        session: impl Into<String>,
        item_id: impl Into<String>,
    ) -> Result<ClaimResponse> {
        let request = ClaimRequest {
            session: session.into(),
            item_id: item_id.into(),
        };
        let response = self
            .client
            .request("item.claim.v1", NamedParams(request))
            .await?;

        Ok(response)
    }

    /// Leave an item's claim queue
    pub async fn unclaim(
        &self,
        session: impl Into<String>,
        item_id: impl Into<String>,
    ) -> Result<UnclaimResponse> {
        let request = UnclaimRequest {
            session: session.into(),
            item_id: item_id.into(),
        };
        let response = self
            .client
            .request("item.unclaim.v1", NamedParams(request))
            .await?;

        Ok(response)
    }

    /// The caller's position in an item's claim queue (1-based, 0 when absent)
    pub async fn queue_position(
        &self,
        session: impl Into<String>,
        item_id: impl Into<String>,
    ) -> Result<QueuePositionResponse> {
        let request = QueuePositionRequest {
            session: session.into(),
            item_id: item_id.into(),
        };
        let response = self
            .client
            .request("item.queue_position.v1", NamedParams(request))
            .await?;

        Ok(response)
    }

    /// An item's full claim queue, in claim order
    pub async fn queue(&self, item_id: impl Into<String>) -> Result<QueueResponse> {
        let request = QueueRequest {
            item_id: item_id.into(),
        };
        let response = self
            .client
            .request("item.queue.v1", NamedParams(request))
            .await?;

        Ok(response)
    }
}
