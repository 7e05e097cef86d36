// SQLite CommentRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tradepost_core::domain::Comment;
use tradepost_core::error::{AppError, Result};
use tradepost_core::port::CommentRepository;

pub struct SqliteCommentRepository {
    pool: SqlitePool,
}

impl SqliteCommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for SqliteCommentRepository {
    async fn insert(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, item_id, author, body, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&comment.id)
        .bind(&comment.item_id)
        .bind(&comment.author)
        .bind(&comment.body)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>("SELECT * FROM comments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_comment()))
    }

    async fn list_by_item(&self, item_id: &str) -> Result<Vec<Comment>> {
        // Thread order: oldest first
        let rows: Vec<CommentRow> = sqlx::query_as(
            r#"
            SELECT * FROM comments
            WHERE item_id = ?
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|row| row.into_comment()).collect())
    }

    async fn update(&self, comment: &Comment) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET body = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&comment.body)
        .bind(comment.updated_at)
        .bind(&comment.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::comment_not_found(&comment.id));
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::comment_not_found(id));
        }

        Ok(())
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: String,
    item_id: String,
    author: String,
    body: String,
    created_at: i64,
    updated_at: i64,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: self.id,
            item_id: self.item_id,
            author: self.author,
            body: self.body,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
