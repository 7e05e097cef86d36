// Post Repository Port (Interface)

use crate::domain::Post;
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for Post persistence
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, post: &Post) -> Result<()>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>>;

    /// All posts, newest first
    async fn list(&self) -> Result<Vec<Post>>;

    /// One author's posts, newest first
    async fn list_by_author(&self, author: &str) -> Result<Vec<Post>>;

    /// Persist content/options/updated_at changes (NotFound if gone)
    async fn update(&self, post: &Post) -> Result<()>;

    /// Delete a post row (NotFound if gone)
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

    /// In-memory post repository for service tests
    pub struct MemPostRepository {
        rows: Mutex<HashMap<String, Post>>,
    }

    impl MemPostRepository {
        pub fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
            }
        }
    }

    impl Default for MemPostRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl PostRepository for MemPostRepository {
        async fn insert(&self, post: &Post) -> Result<()> {
            self.rows
                .lock()
                .unwrap()
                .insert(post.id.clone(), post.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Post>> {
            Ok(self.rows.lock().unwrap().get(id).cloned())
        }

        async fn list(&self) -> Result<Vec<Post>> {
            let mut posts: Vec<Post> = self.rows.lock().unwrap().values().cloned().collect();
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(posts)
        }

        async fn list_by_author(&self, author: &str) -> Result<Vec<Post>> {
            let mut posts: Vec<Post> = self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|p| p.author == author)
                .cloned()
                .collect();
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(posts)
        }

        async fn update(&self, post: &Post) -> Result<()> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(&post.id) {
                Some(row) => {
                    *row = post.clone();
                    Ok(())
                }
                None => Err(AppError::post_not_found(&post.id)),
            }
        }

        async fn delete(&self, id: &str) -> Result<()> {
            match self.rows.lock().unwrap().remove(id) {
                Some(_) => Ok(()),
                None => Err(AppError::post_not_found(id)),
            }
        }
    }
}
