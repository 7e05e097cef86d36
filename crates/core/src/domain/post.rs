// Post Domain Model (Phase 3)

use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Post ID (UUID v4)
pub type PostId = String;

/// Presentation options attached to a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// Post Entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author: UserId,
    pub content: String,
    pub options: Option<PostOptions>,
    pub created_at: i64, // epoch ms
    pub updated_at: i64,
}

impl Post {
    pub fn new(
        id: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
        options: Option<PostOptions>,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            content: content.into(),
            options,
            created_at,
            updated_at: created_at,
        }
    }
}
