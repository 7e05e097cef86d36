// Comment Domain Model (Phase 3)

use serde::{Deserialize, Serialize};

use crate::domain::item::ItemId;
use crate::domain::user::UserId;

/// Comment ID (UUID v4)
pub type CommentId = String;

/// Comment on an item listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub item_id: ItemId,
    pub author: UserId,
    pub body: String,
    pub created_at: i64, // epoch ms
    pub updated_at: i64,
}

impl Comment {
    pub fn new(
        id: impl Into<String>,
        item_id: impl Into<String>,
        author: impl Into<String>,
        body: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            item_id: item_id.into(),
            author: author.into(),
            body: body.into(),
            created_at,
            updated_at: created_at,
        }
    }
}
