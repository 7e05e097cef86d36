// Post Service - feed post CRUD and authorship checks (Phase 3)

use crate::domain::{Post, PostOptions};
use crate::error::{AppError, Result};
use crate::port::{IdProvider, PostRepository, TimeProvider};
use std::sync::Arc;

/// Feed post use cases
pub struct PostService {
    post_repo: Arc<dyn PostRepository>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl PostService {
    pub fn new(
        post_repo: Arc<dyn PostRepository>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            post_repo,
            id_provider,
            time_provider,
        }
    }

    pub async fn create(
        &self,
        author: &str,
        content: &str,
        options: Option<PostOptions>,
    ) -> Result<Post> {
        if content.trim().is_empty() {
            return Err(AppError::Validation(
                "post content must not be empty".to_string(),
            ));
        }

        let post = Post::new(
            self.id_provider.generate_id(),
            author,
            content,
            options,
            self.time_provider.now_millis(),
        );
        self.post_repo.insert(&post).await?;
        Ok(post)
    }

    pub async fn get(&self, id: &str) -> Result<Post> {
        self.post_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::post_not_found(id))
    }

    pub async fn list(&self) -> Result<Vec<Post>> {
        self.post_repo.list().await
    }

    pub async fn list_by_author(&self, author: &str) -> Result<Vec<Post>> {
        self.post_repo.list_by_author(author).await
    }

    /// Update content and/or options; absent fields stay untouched.
    pub async fn update(
        &self,
        id: &str,
        content: Option<String>,
        options: Option<PostOptions>,
    ) -> Result<Post> {
        let mut post = self.get(id).await?;

        if let Some(content) = content {
            if content.trim().is_empty() {
                return Err(AppError::Validation(
                    "post content must not be empty".to_string(),
                ));
            }
            post.content = content;
        }
        if let Some(options) = options {
            post.options = Some(options);
        }
        post.updated_at = self.time_provider.now_millis();

        self.post_repo.update(&post).await?;
        Ok(post)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.post_repo.delete(id).await
    }

    /// Load the post and require `user` to be its author.
    pub async fn assert_author(&self, id: &str, user: &str) -> Result<Post> {
        let post = self.get(id).await?;
        if post.author != user {
            return Err(AppError::Forbidden(format!(
                "user {} is not the author of post {}",
                user, id
            )));
        }
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::id_provider::mocks::SequentialIdProvider;
    use crate::port::post_repository::mocks::MemPostRepository;
    use crate::port::time_provider::mocks::FixedTimeProvider;

    fn service() -> PostService {
        PostService::new(
            Arc::new(MemPostRepository::new()),
            Arc::new(SequentialIdProvider::new("post")),
            Arc::new(FixedTimeProvider::new(1_000)),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_empty_content() {
        let service = service();
        assert!(service.create("alice", "   ", None).await.is_err());
    }

    #[tokio::test]
    async fn test_update_keeps_options_when_absent() {
        let service = service();
        let post = service
            .create(
                "alice",
                "selling some stuff",
                Some(PostOptions {
                    background_color: Some("#ffee00".to_string()),
                }),
            )
            .await
            .unwrap();

        let updated = service
            .update(&post.id, Some("sold!".to_string()), None)
            .await
            .unwrap();

        assert_eq!(updated.content, "sold!");
        assert_eq!(
            updated.options.unwrap().background_color.as_deref(),
            Some("#ffee00")
        );
    }

    #[tokio::test]
    async fn test_assert_author() {
        let service = service();
        let post = service.create("alice", "hello", None).await.unwrap();

        assert!(service.assert_author(&post.id, "alice").await.is_ok());
        let err = service.assert_author(&post.id, "bob").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
