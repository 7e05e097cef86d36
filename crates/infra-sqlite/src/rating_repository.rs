// SQLite RatingRepository Implementation
//
// The UNIQUE(item_id, rater) constraint backs the one-rating-per-item rule;
// a duplicate insert surfaces as Conflict through map_sqlx_error.

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tradepost_core::domain::Rating;
use tradepost_core::error::{AppError, Result};
use tradepost_core::port::RatingRepository;

pub struct SqliteRatingRepository {
    pool: SqlitePool,
}

impl SqliteRatingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for SqliteRatingRepository {
    async fn insert(&self, rating: &Rating) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ratings (id, seller, item_id, rater, score, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&rating.id)
        .bind(&rating.seller)
        .bind(&rating.item_id)
        .bind(&rating.rater)
        .bind(rating.score)
        .bind(rating.created_at)
        .bind(rating.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_item_and_rater(
        &self,
        item_id: &str,
        rater: &str,
    ) -> Result<Option<Rating>> {
        let row = sqlx::query_as::<_, RatingRow>(
            "SELECT * FROM ratings WHERE item_id = ? AND rater = ?",
        )
        .bind(item_id)
        .bind(rater)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_rating()))
    }

    async fn scores_for_seller(&self, seller: &str) -> Result<Vec<i32>> {
        let scores: Vec<i32> = sqlx::query_scalar("SELECT score FROM ratings WHERE seller = ?")
            .bind(seller)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(scores)
    }

    async fn update(&self, rating: &Rating) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE ratings
            SET score = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(rating.score)
        .bind(rating.updated_at)
        .bind(&rating.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "rating {} not found",
                rating.id
            )));
        }

        Ok(())
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct RatingRow {
    id: String,
    seller: String,
    item_id: String,
    rater: String,
    score: i32,
    created_at: i64,
    updated_at: i64,
}

impl RatingRow {
    fn into_rating(self) -> Rating {
        Rating {
            id: self.id,
            seller: self.seller,
            item_id: self.item_id,
            rater: self.rater,
            score: self.score,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};

    async fn setup_repo() -> SqliteRatingRepository {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteRatingRepository::new(pool)
    }

    #[tokio::test]
    async fn test_duplicate_rating_is_conflict() {
        let repo = setup_repo().await;

        repo.insert(&Rating::new("r-1", "alice", "item-1", "bob", 5, 1000))
            .await
            .unwrap();

        let err = repo
            .insert(&Rating::new("r-2", "alice", "item-1", "bob", 1, 2000))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        // Same rater on a different item is fine
        repo.insert(&Rating::new("r-3", "alice", "item-2", "bob", 4, 3000))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_scores_for_seller_spans_items() {
        let repo = setup_repo().await;

        repo.insert(&Rating::new("r-1", "alice", "item-1", "bob", 5, 1000))
            .await
            .unwrap();
        repo.insert(&Rating::new("r-2", "alice", "item-2", "carol", 3, 2000))
            .await
            .unwrap();
        repo.insert(&Rating::new("r-3", "dave", "item-3", "bob", 1, 3000))
            .await
            .unwrap();

        let mut scores = repo.scores_for_seller("alice").await.unwrap();
        scores.sort();
        assert_eq!(scores, vec![3, 5]);
    }

    #[tokio::test]
    async fn test_update_changes_score() {
        let repo = setup_repo().await;

        let mut rating = Rating::new("r-1", "alice", "item-1", "bob", 2, 1000);
        repo.insert(&rating).await.unwrap();

        rating.score = 4;
        rating.updated_at = 2000;
        repo.update(&rating).await.unwrap();

        let found = repo
            .find_by_item_and_rater("item-1", "bob")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.score, 4);
        assert_eq!(found.updated_at, 2000);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = setup_repo().await;

        let ghost = Rating::new("ghost", "alice", "item-1", "bob", 3, 1000);
        assert!(repo.update(&ghost).await.unwrap_err().is_not_found());
    }
}
