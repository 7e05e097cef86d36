// Comment Service - per-item threads and authorship checks (Phase 3)

use crate::domain::Comment;
use crate::error::{AppError, Result};
use crate::port::{CommentRepository, IdProvider, ItemRepository, TimeProvider};
use std::sync::Arc;

/// Comment use cases. Comments hang off an item; creating or listing
/// against a missing item is NotFound. Items deleted later leave orphans
/// that maintenance sweeps.
pub struct CommentService {
    comment_repo: Arc<dyn CommentRepository>,
    item_repo: Arc<dyn ItemRepository>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl CommentService {
    pub fn new(
        comment_repo: Arc<dyn CommentRepository>,
        item_repo: Arc<dyn ItemRepository>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            comment_repo,
            item_repo,
            id_provider,
            time_provider,
        }
    }

    pub async fn create(&self, item_id: &str, author: &str, body: &str) -> Result<Comment> {
        if body.trim().is_empty() {
            return Err(AppError::Validation(
                "comment body must not be empty".to_string(),
            ));
        }
        if self.item_repo.find_by_id(item_id).await?.is_none() {
            return Err(AppError::item_not_found(item_id));
        }

        let comment = Comment::new(
            self.id_provider.generate_id(),
            item_id,
            author,
            body,
            self.time_provider.now_millis(),
        );
        self.comment_repo.insert(&comment).await?;
        Ok(comment)
    }

    /// One item's thread, oldest first.
    pub async fn list_for_item(&self, item_id: &str) -> Result<Vec<Comment>> {
        if self.item_repo.find_by_id(item_id).await?.is_none() {
            return Err(AppError::item_not_found(item_id));
        }
        self.comment_repo.list_by_item(item_id).await
    }

    pub async fn update(&self, comment_id: &str, body: &str) -> Result<Comment> {
        if body.trim().is_empty() {
            return Err(AppError::Validation(
                "comment body must not be empty".to_string(),
            ));
        }
        let mut comment = self.get(comment_id).await?;
        comment.body = body.to_string();
        comment.updated_at = self.time_provider.now_millis();
        self.comment_repo.update(&comment).await?;
        Ok(comment)
    }

    pub async fn delete(&self, comment_id: &str) -> Result<()> {
        self.comment_repo.delete(comment_id).await
    }

    /// Load the comment, check it belongs to `item_id`, and require `user`
    /// to be its author.
    pub async fn assert_commenter(
        &self,
        comment_id: &str,
        item_id: &str,
        user: &str,
    ) -> Result<Comment> {
        let comment = self.get(comment_id).await?;
        if comment.item_id != item_id {
            // a comment under a different item is invisible here
            return Err(AppError::comment_not_found(comment_id));
        }
        if comment.author != user {
            return Err(AppError::Forbidden(format!(
                "user {} is not the author of comment {}",
                user, comment_id
            )));
        }
        Ok(comment)
    }

    async fn get(&self, comment_id: &str) -> Result<Comment> {
        self.comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::comment_not_found(comment_id))
    }
}
