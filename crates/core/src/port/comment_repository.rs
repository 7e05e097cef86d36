// Comment Repository Port (Interface)

use crate::domain::Comment;
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for Comment persistence
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: &Comment) -> Result<()>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Comment>>;

    /// One item's comment thread, oldest first
    async fn list_by_item(&self, item_id: &str) -> Result<Vec<Comment>>;

    /// Persist body/updated_at changes (NotFound if gone)
    async fn update(&self, comment: &Comment) -> Result<()>;

    /// Delete a comment row (NotFound if gone)
    async fn delete(&self, id: &str) -> Result<()>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory comment repository for service tests
    pub struct MemCommentRepository {
        rows: Mutex<HashMap<String, Comment>>,
    }

    impl MemCommentRepository {
        pub fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
            }
        }
    }

    impl Default for MemCommentRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl CommentRepository for MemCommentRepository {
        async fn insert(&self, comment: &Comment) -> Result<()> {
            self.rows
                .lock()
                .unwrap()
                .insert(comment.id.clone(), comment.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Comment>> {
            Ok(self.rows.lock().unwrap().get(id).cloned())
        }

        async fn list_by_item(&self, item_id: &str) -> Result<Vec<Comment>> {
            let mut comments: Vec<Comment> = self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|c| c.item_id == item_id)
                .cloned()
                .collect();
            comments.sort_by_key(|c| c.created_at);
            Ok(comments)
        }

        async fn update(&self, comment: &Comment) -> Result<()> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(&comment.id) {
                Some(row) => {
                    *row = comment.clone();
                    Ok(())
                }
                None => Err(AppError::comment_not_found(&comment.id)),
            }
        }

        async fn delete(&self, id: &str) -> Result<()> {
            match self.rows.lock().unwrap().remove(id) {
                Some(_) => Ok(()),
                None => Err(AppError::comment_not_found(id)),
            }
        }
    }
}
