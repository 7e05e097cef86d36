// Rating Repository Port (Interface)

use crate::domain::Rating;
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for Rating persistence.
///
/// One rating per (item, rater); uniqueness is backed by a DB constraint
/// and surfaces as Conflict on a duplicate insert.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn insert(&self, rating: &Rating) -> Result<()>;

    async fn find_by_item_and_rater(&self, item_id: &str, rater: &str)
        -> Result<Option<Rating>>;

    /// All scores ever given to a seller (across items, deleted ones too)
    async fn scores_for_seller(&self, seller: &str) -> Result<Vec<i32>>;

    /// Persist score/updated_at changes (NotFound if gone)
    async fn update(&self, rating: &Rating) -> Result<()>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory rating repository for service tests
    pub struct MemRatingRepository {
        rows: Mutex<HashMap<String, Rating>>,
    }

    impl MemRatingRepository {
        pub fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
            }
        }
    }

    impl Default for MemRatingRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl RatingRepository for MemRatingRepository {
        async fn insert(&self, rating: &Rating) -> Result<()> {
            let mut rows = self.rows.lock().unwrap();
            if rows
                .values()
                .any(|r| r.item_id == rating.item_id && r.rater == rating.rater)
            {
                return Err(AppError::Conflict(format!(
                    "rating for item {} by {} already exists",
                    rating.item_id, rating.rater
                )));
            }
            rows.insert(rating.id.clone(), rating.clone());
            Ok(())
        }

        async fn find_by_item_and_rater(
            &self,
            item_id: &str,
            rater: &str,
        ) -> Result<Option<Rating>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|r| r.item_id == item_id && r.rater == rater)
                .cloned())
        }

        async fn scores_for_seller(&self, seller: &str) -> Result<Vec<i32>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.seller == seller)
                .map(|r| r.score)
                .collect())
        }

        async fn update(&self, rating: &Rating) -> Result<()> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(&rating.id) {
                Some(row) => {
                    *row = rating.clone();
                    Ok(())
                }
                None => Err(AppError::NotFound(format!(
                    "rating {} not found",
                    rating.id
                ))),
            }
        }
    }
}
