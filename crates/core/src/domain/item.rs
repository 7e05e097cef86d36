// Item Domain Model (Phase 1 + Phase 2 queue field)

use serde::{Deserialize, Serialize};

use crate::domain::claim_queue::ClaimQueue;
use crate::domain::error::{DomainError, Result};
use crate::domain::user::UserId;

/// Item ID (UUID v4)
pub type ItemId = String;

/// Item listing entity
///
/// The claim queue is an embedded attribute of the item: created empty with
/// it, destroyed with it. Listing updates never touch the queue; queue
/// replaces never touch the listing columns (ADR-009).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub seller: UserId,
    pub name: String,
    pub cost: i64,
    pub description: String,
    pub pictures: Vec<String>, // picture URLs
    pub contact: String,

    // Phase 2
    pub claim_queue: ClaimQueue,

    pub created_at: i64, // epoch ms
    pub updated_at: i64,
}

impl Item {
    /// Create a new Item with an empty claim queue
    pub fn new(
        id: impl Into<String>,
        seller: impl Into<String>,
        name: impl Into<String>,
        cost: i64,
        description: impl Into<String>,
        pictures: Vec<String>,
        contact: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            seller: seller.into(),
            name: name.into(),
            cost,
            description: description.into(),
            pictures,
            contact: contact.into(),
            claim_queue: ClaimQueue::new(),
            created_at,
            updated_at: created_at,
        }
    }
}

/// Partial update for an item listing; `None` fields stay untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub cost: Option<i64>,
    pub description: Option<String>,
    pub pictures: Option<Vec<String>>,
    pub contact: Option<String>,
}

impl ItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.cost.is_none()
            && self.description.is_none()
            && self.pictures.is_none()
            && self.contact.is_none()
    }
}

/// Validate an item name: non-blank
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DomainError::ValidationError(
            "item name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate an item cost: non-negative
pub fn validate_cost(cost: i64) -> Result<()> {
    if cost < 0 {
        return Err(DomainError::ValidationError(format!(
            "item cost must not be negative (got {})",
            cost
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_has_empty_queue() {
        let item = Item::new(
            "item-1",
            "seller-1",
            "couch",
            120,
            "well-loved",
            vec![],
            "seller@example.com",
            1000,
        );
        assert!(item.claim_queue.is_empty());
        assert_eq!(item.updated_at, item.created_at);
    }

    #[test]
    fn test_validate_name_rejects_blank() {
        assert!(validate_name("  ").is_err());
        assert!(validate_name("couch").is_ok());
    }

    #[test]
    fn test_validate_cost_rejects_negative() {
        assert!(validate_cost(-1).is_err());
        assert!(validate_cost(0).is_ok());
    }

    #[test]
    fn test_empty_update_detected() {
        assert!(ItemUpdate::default().is_empty());
        let update = ItemUpdate {
            cost: Some(50),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
