// Rating Domain Model (Phase 3)

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, Result};
use crate::domain::item::ItemId;
use crate::domain::user::UserId;

/// Rating ID (UUID v4)
pub type RatingId = String;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;

/// One rater's score for one item, attributed to the seller.
///
/// At most one rating per (item, rater); ratings outlive the item so the
/// seller's reputation is not reset by delisting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub id: RatingId,
    pub seller: UserId,
    pub item_id: ItemId,
    pub rater: UserId,
    pub score: i32,
    pub created_at: i64, // epoch ms
    pub updated_at: i64,
}

impl Rating {
    pub fn new(
        id: impl Into<String>,
        seller: impl Into<String>,
        item_id: impl Into<String>,
        rater: impl Into<String>,
        score: i32,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            seller: seller.into(),
            item_id: item_id.into(),
            rater: rater.into(),
            score,
            created_at,
            updated_at: created_at,
        }
    }
}

pub fn validate_score(score: i32) -> Result<()> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(DomainError::InvalidRatingScore(score));
    }
    Ok(())
}

/// Average of a score set, 0.0 when empty (never NaN)
pub fn average_score(scores: &[i32]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|s| *s as f64).sum::<f64>() / scores.len() as f64
}
