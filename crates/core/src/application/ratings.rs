// Rating Service - seller reputation (Phase 3)

use crate::domain::rating::{average_score, validate_score};
use crate::domain::Rating;
use crate::error::{AppError, Result};
use crate::port::{IdProvider, ItemRepository, RatingRepository, TimeProvider};
use std::sync::Arc;

/// Rating use cases. One rating per (item, rater); the seller is captured
/// from the item at rating time so reputation survives delisting.
pub struct RatingService {
    rating_repo: Arc<dyn RatingRepository>,
    item_repo: Arc<dyn ItemRepository>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl RatingService {
    pub fn new(
        rating_repo: Arc<dyn RatingRepository>,
        item_repo: Arc<dyn ItemRepository>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            rating_repo,
            item_repo,
            id_provider,
            time_provider,
        }
    }

    /// Rate an item (1..=5). Conflict if this rater already rated it.
    pub async fn rate(&self, item_id: &str, rater: &str, score: i32) -> Result<Rating> {
        validate_score(score)?;

        let item = self
            .item_repo
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::item_not_found(item_id))?;

        if self
            .rating_repo
            .find_by_item_and_rater(item_id, rater)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "item {} already rated by this user, update the rating instead",
                item_id
            )));
        }

        let rating = Rating::new(
            self.id_provider.generate_id(),
            item.seller,
            item_id,
            rater,
            score,
            self.time_provider.now_millis(),
        );
        self.rating_repo.insert(&rating).await?;
        Ok(rating)
    }

    /// Change an existing rating's score.
    pub async fn update_rating(&self, item_id: &str, rater: &str, score: i32) -> Result<Rating> {
        validate_score(score)?;

        let mut rating = self
            .rating_repo
            .find_by_item_and_rater(item_id, rater)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("no rating for item {} by this user", item_id))
            })?;

        rating.score = score;
        rating.updated_at = self.time_provider.now_millis();
        self.rating_repo.update(&rating).await?;
        Ok(rating)
    }

    /// Mean of every score the seller has received; 0.0 when unrated.
    pub async fn seller_average(&self, seller: &str) -> Result<f64> {
        let scores = self.rating_repo.scores_for_seller(seller).await?;
        Ok(average_score(&scores))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Item;
    use crate::port::id_provider::mocks::SequentialIdProvider;
    use crate::port::item_repository::mocks::MemItemRepository;
    use crate::port::rating_repository::mocks::MemRatingRepository;
    use crate::port::time_provider::mocks::FixedTimeProvider;

    fn service() -> RatingService {
        let items = MemItemRepository::new()
            .with_item(Item::new(
                "item-1", "seller-1", "couch", 10, "", vec![], "c", 500,
            ))
            .with_item(Item::new(
                "item-2", "seller-1", "lamp", 5, "", vec![], "c", 600,
            ));
        RatingService::new(
            Arc::new(MemRatingRepository::new()),
            Arc::new(items),
            Arc::new(SequentialIdProvider::new("rating")),
            Arc::new(FixedTimeProvider::new(1_000)),
        )
    }

    #[tokio::test]
    async fn test_rate_captures_seller_from_item() {
        let service = service();
        let rating = service.rate("item-1", "buyer-1", 4).await.unwrap();
        assert_eq!(rating.seller, "seller-1");
    }

    #[tokio::test]
    async fn test_double_rate_is_conflict() {
        let service = service();
        service.rate("item-1", "buyer-1", 4).await.unwrap();

        let err = service.rate("item-1", "buyer-1", 5).await.unwrap_err();
        assert!(err.is_conflict());

        // same rater on another item is fine
        assert!(service.rate("item-2", "buyer-1", 5).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_rating_changes_average() {
        let service = service();
        service.rate("item-1", "buyer-1", 2).await.unwrap();
        service.rate("item-2", "buyer-2", 4).await.unwrap();
        assert_eq!(service.seller_average("seller-1").await.unwrap(), 3.0);

        service.update_rating("item-1", "buyer-1", 4).await.unwrap();
        assert_eq!(service.seller_average("seller-1").await.unwrap(), 4.0);
    }

    #[tokio::test]
    async fn test_unrated_seller_average_is_zero() {
        let service = service();
        assert_eq!(service.seller_average("seller-1").await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_out_of_range_score_rejected() {
        let service = service();
        assert!(service.rate("item-1", "buyer-1", 0).await.is_err());
        assert!(service.rate("item-1", "buyer-1", 6).await.is_err());
    }

    #[tokio::test]
    async fn test_update_without_existing_rating_is_not_found() {
        let service = service();
        let err = service
            .update_rating("item-1", "buyer-1", 3)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
