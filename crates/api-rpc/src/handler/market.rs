//! Market Surface - item.*, claim queue and rating.* methods

use super::RpcHandler;
use crate::error::to_rpc_error;
use crate::types::{
    ClaimRequest, ClaimResponse, CreateItemRequest, DeleteItemRequest, DeleteItemResponse,
    ItemResponse, ItemView, ListItemsRequest, ListItemsResponse, QueueEntry, QueuePositionRequest,
    QueuePositionResponse, QueueRequest, QueueResponse, RateItemRequest, RatingResponse,
    RatingView, SellerRatingRequest, SellerRatingResponse, UnclaimRequest, UnclaimResponse,
    UpdateItemRequest, UpdateRatingRequest,
};
use jsonrpsee::types::ErrorObjectOwned;
use tradepost_core::domain::ItemUpdate;

impl RpcHandler {
    /// item.create.v1
    pub async fn create_item(
        &self,
        params: CreateItemRequest,
    ) -> Result<ItemResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        let item = self
            .ctx
            .items
            .create(
                &caller,
                &params.name,
                params.cost,
                &params.description,
                params.pictures,
                &params.contact,
            )
            .await
            .map_err(to_rpc_error)?;

        Ok(ItemResponse {
            item: ItemView::from_item(&item),
        })
    }

    /// item.list.v1
    pub async fn list_items(
        &self,
        params: ListItemsRequest,
    ) -> Result<ListItemsResponse, ErrorObjectOwned> {
        let items = match &params.seller_id {
            Some(seller) => self.ctx.items.list_by_seller(seller).await,
            None => self.ctx.items.list().await,
        }
        .map_err(to_rpc_error)?;

        Ok(ListItemsResponse {
            items: items.iter().map(ItemView::from_item).collect(),
        })
    }

    /// item.update.v1
    pub async fn update_item(
        &self,
        params: UpdateItemRequest,
    ) -> Result<ItemResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        self.ctx
            .items
            .assert_seller(&params.item_id, &caller)
            .await
            .map_err(to_rpc_error)?;

        let update = ItemUpdate {
            name: params.name,
            cost: params.cost,
            description: params.description,
            pictures: params.pictures,
            contact: params.contact,
        };

        let item = self
            .ctx
            .items
            .update(&params.item_id, update)
            .await
            .map_err(to_rpc_error)?;

        Ok(ItemResponse {
            item: ItemView::from_item(&item),
        })
    }

    /// item.delete.v1
    pub async fn delete_item(
        &self,
        params: DeleteItemRequest,
    ) -> Result<DeleteItemResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        self.ctx
            .items
            .assert_seller(&params.item_id, &caller)
            .await
            .map_err(to_rpc_error)?;

        self.ctx
            .items
            .delete(&params.item_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(DeleteItemResponse { deleted: true })
    }

    /// item.claim.v1
    pub async fn claim(&self, params: ClaimRequest) -> Result<ClaimResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        self.ctx
            .claims
            .join(&params.item_id, &caller)
            .await
            .map_err(to_rpc_error)?;

        // Position is advisory; a concurrent unclaim can race this read.
        let position = self
            .ctx
            .claims
            .position(&params.item_id, &caller)
            .await
            .map_err(to_rpc_error)?
            .unwrap_or(0);

        Ok(ClaimResponse {
            item_id: params.item_id,
            position,
        })
    }

    /// item.unclaim.v1
    pub async fn unclaim(
        &self,
        params: UnclaimRequest,
    ) -> Result<UnclaimResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        self.ctx
            .claims
            .leave(&params.item_id, &caller)
            .await
            .map_err(to_rpc_error)?;

        Ok(UnclaimResponse {
            item_id: params.item_id,
            unclaimed: true,
        })
    }

    /// item.queue_position.v1
    pub async fn queue_position(
        &self,
        params: QueuePositionRequest,
    ) -> Result<QueuePositionResponse, ErrorObjectOwned> {
        let caller = self.caller(&params.session).await?;

        let position = self
            .ctx
            .claims
            .position(&params.item_id, &caller)
            .await
            .map_err(to_rpc_error)?
            .unwrap_or(0);

        Ok(QueuePositionResponse {
            item_id: params.item_id,
            position,
        })
    }

    /// item.queue.v1
    pub async fn queue(&self, params: QueueRequest) -> Result<QueueResponse, ErrorObjectOwned> {
        let claimants = self
            .ctx
            .claims
            .list(&params.item_id)
            .await
            .map_err(to_rpc_error)?;

        let usernames = self.display_names(&claimants).await?;

        let claimants = claimants
            .into_iter()
            .zip(usernames)
            .enumerate()
            .map(|(idx, (user_id, username))| QueueEntry {
                position: idx as u32 + 1,
                user_id,
                username,
            })
            .collect();

        Ok(QueueResponse {
            item_id: params.item_id,
            claimants,
        })
    }

    /// rating.rate.v1
    pub async fn rate_item(
        &self,
        params: RateItemRequest,
    ) -> Result<RatingResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        let rating = self
            .ctx
            .ratings
            .rate(&params.item_id, &caller, params.score)
            .await
            .map_err(to_rpc_error)?;

        Ok(RatingResponse {
            rating: RatingView::from_rating(&rating),
        })
    }

    /// rating.update.v1
    pub async fn update_rating(
        &self,
        params: UpdateRatingRequest,
    ) -> Result<RatingResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        let rating = self
            .ctx
            .ratings
            .update_rating(&params.item_id, &caller, params.score)
            .await
            .map_err(to_rpc_error)?;

        Ok(RatingResponse {
            rating: RatingView::from_rating(&rating),
        })
    }

    /// rating.seller.v1
    pub async fn seller_rating(
        &self,
        params: SellerRatingRequest,
    ) -> Result<SellerRatingResponse, ErrorObjectOwned> {
        let average = self
            .ctx
            .ratings
            .seller_average(&params.seller_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(SellerRatingResponse {
            seller_id: params.seller_id,
            average,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{signed_up, test_handler};
    use crate::error::code;
    use crate::types::*;

    #[tokio::test]
    async fn test_item_crud_requires_the_seller() {
        let handler = test_handler(&[]);
        let (seller_id, seller_token) = signed_up(&handler, "mina").await;
        let (_, other_token) = signed_up(&handler, "june").await;

        let created = handler
            .create_item(CreateItemRequest {
                session: seller_token.clone(),
                name: "desk lamp".to_string(),
                cost: 1500,
                description: "warm light".to_string(),
                pictures: vec![],
                contact: "dorm 3".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.item.seller_id, seller_id);

        // A non-seller may neither edit nor delete
        let err = handler
            .update_item(UpdateItemRequest {
                session: other_token.clone(),
                item_id: created.item.id.clone(),
                name: Some("mine now".to_string()),
                cost: None,
                description: None,
                pictures: None,
                contact: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), code::FORBIDDEN);

        let err = handler
            .delete_item(DeleteItemRequest {
                session: other_token,
                item_id: created.item.id.clone(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), code::FORBIDDEN);

        // The seller can do both
        let updated = handler
            .update_item(UpdateItemRequest {
                session: seller_token.clone(),
                item_id: created.item.id.clone(),
                name: None,
                cost: Some(1200),
                description: None,
                pictures: None,
                contact: None,
            })
            .await
            .unwrap();
        assert_eq!(updated.item.cost, 1200);
        assert_eq!(updated.item.name, "desk lamp");

        handler
            .delete_item(DeleteItemRequest {
                session: seller_token,
                item_id: created.item.id,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_claim_reports_one_based_position() {
        let handler = test_handler(&["i-1"]);
        let (_, first) = signed_up(&handler, "mina").await;
        let (_, second) = signed_up(&handler, "june").await;

        let resp = handler
            .claim(ClaimRequest {
                session: first.clone(),
                item_id: "i-1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.position, 1);

        let resp = handler
            .claim(ClaimRequest {
                session: second,
                item_id: "i-1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.position, 2);

        // Claiming again does not move or duplicate the caller
        let resp = handler
            .claim(ClaimRequest {
                session: first,
                item_id: "i-1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.position, 1);
    }

    #[tokio::test]
    async fn test_queue_position_is_zero_when_absent() {
        let handler = test_handler(&["i-1"]);
        let (_, token) = signed_up(&handler, "mina").await;

        let resp = handler
            .queue_position(QueuePositionRequest {
                session: token.clone(),
                item_id: "i-1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.position, 0);

        handler
            .claim(ClaimRequest {
                session: token.clone(),
                item_id: "i-1".to_string(),
            })
            .await
            .unwrap();
        handler
            .unclaim(UnclaimRequest {
                session: token.clone(),
                item_id: "i-1".to_string(),
            })
            .await
            .unwrap();

        let resp = handler
            .queue_position(QueuePositionRequest {
                session: token,
                item_id: "i-1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.position, 0);
    }

    #[tokio::test]
    async fn test_unclaim_promotes_later_claimants() {
        let handler = test_handler(&["i-1"]);
        let (_, first) = signed_up(&handler, "mina").await;
        let (_, second) = signed_up(&handler, "june").await;

        for token in [&first, &second] {
            handler
                .claim(ClaimRequest {
                    session: token.clone(),
                    item_id: "i-1".to_string(),
                })
                .await
                .unwrap();
        }

        handler
            .unclaim(UnclaimRequest {
                session: first,
                item_id: "i-1".to_string(),
            })
            .await
            .unwrap();

        let resp = handler
            .queue_position(QueuePositionRequest {
                session: second,
                item_id: "i-1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.position, 1);
    }

    #[tokio::test]
    async fn test_queue_view_resolves_usernames_in_claim_order() {
        let handler = test_handler(&["i-1"]);
        let (mina_id, mina) = signed_up(&handler, "mina").await;
        let (_, june) = signed_up(&handler, "june").await;

        for token in [&mina, &june] {
            handler
                .claim(ClaimRequest {
                    session: token.clone(),
                    item_id: "i-1".to_string(),
                })
                .await
                .unwrap();
        }

        let resp = handler
            .queue(QueueRequest {
                item_id: "i-1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(resp.claimants.len(), 2);
        assert_eq!(resp.claimants[0].position, 1);
        assert_eq!(resp.claimants[0].user_id, mina_id);
        assert_eq!(resp.claimants[0].username, "mina");
        assert_eq!(resp.claimants[1].position, 2);
        assert_eq!(resp.claimants[1].username, "june");
    }

    #[tokio::test]
    async fn test_queue_view_renders_deleted_claimants_as_placeholder() {
        let handler = test_handler(&["i-1"]);
        let (_, mina) = signed_up(&handler, "mina").await;

        handler
            .claim(ClaimRequest {
                session: mina.clone(),
                item_id: "i-1".to_string(),
            })
            .await
            .unwrap();

        handler
            .delete_user(DeleteUserRequest { session: mina })
            .await
            .unwrap();

        let resp = handler
            .queue(QueueRequest {
                item_id: "i-1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.claimants.len(), 1);
        assert_eq!(
            resp.claimants[0].username,
            tradepost_core::domain::DELETED_USER
        );
    }

    #[tokio::test]
    async fn test_claiming_a_missing_item_is_not_found() {
        let handler = test_handler(&[]);
        let (_, token) = signed_up(&handler, "mina").await;

        let err = handler
            .claim(ClaimRequest {
                session: token,
                item_id: "ghost".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), code::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rating_flow_and_seller_average() {
        let handler = test_handler(&[]);
        let (seller_id, seller) = signed_up(&handler, "mina").await;
        let (_, rater_a) = signed_up(&handler, "june").await;
        let (_, rater_b) = signed_up(&handler, "hana").await;

        let item = handler
            .create_item(CreateItemRequest {
                session: seller,
                name: "desk lamp".to_string(),
                cost: 1500,
                description: String::new(),
                pictures: vec![],
                contact: String::new(),
            })
            .await
            .unwrap()
            .item;

        handler
            .rate_item(RateItemRequest {
                session: rater_a.clone(),
                item_id: item.id.clone(),
                score: 5,
            })
            .await
            .unwrap();
        handler
            .rate_item(RateItemRequest {
                session: rater_b,
                item_id: item.id.clone(),
                score: 2,
            })
            .await
            .unwrap();

        // Second rating by the same rater is a conflict, not an overwrite
        let err = handler
            .rate_item(RateItemRequest {
                session: rater_a.clone(),
                item_id: item.id.clone(),
                score: 1,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), code::CONFLICT);

        let avg = handler
            .seller_rating(SellerRatingRequest {
                seller_id: seller_id.clone(),
            })
            .await
            .unwrap();
        assert!((avg.average - 3.5).abs() < f64::EPSILON);

        // update_rating revises the existing row
        handler
            .update_rating(UpdateRatingRequest {
                session: rater_a,
                item_id: item.id,
                score: 3,
            })
            .await
            .unwrap();

        let avg = handler
            .seller_rating(SellerRatingRequest { seller_id })
            .await
            .unwrap();
        assert!((avg.average - 2.5).abs() < f64::EPSILON);
    }
}
