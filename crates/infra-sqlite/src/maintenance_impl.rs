// SQLite Maintenance Implementation (Phase 4)
use async_trait::async_trait;
use sqlx::SqlitePool;
use tradepost_core::error::{AppError, Result};
use tradepost_core::port::{Maintenance, MaintenanceStats};
use tracing::info;

/// SQLite maintenance implementation
pub struct SqliteMaintenance {
    pool: SqlitePool,
}

impl SqliteMaintenance {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get DB file size in MB
    async fn get_db_size(&self) -> Result<f64> {
        let page_count: i64 = sqlx::query_scalar("PRAGMA page_count")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get page count: {}", e)))?;

        let page_size: i64 = sqlx::query_scalar("PRAGMA page_size")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get page size: {}", e)))?;

        let size_bytes = page_count * page_size;
        let size_mb = size_bytes as f64 / (1024.0 * 1024.0);

        Ok(size_mb)
    }
}

#[async_trait]
impl Maintenance for SqliteMaintenance {
    async fn vacuum(&self) -> Result<f64> {
        info!("Running VACUUM to optimize database...");

        let size_before = self.get_db_size().await?;

        // VACUUM reclaims space and defragments
        sqlx::query("VACUUM")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("VACUUM failed: {}", e)))?;

        let size_after = self.get_db_size().await?;
        let reclaimed = (size_before - size_after).max(0.0);

        info!(
            size_before_mb = size_before,
            size_after_mb = size_after,
            reclaimed_mb = reclaimed,
            "VACUUM completed"
        );

        Ok(reclaimed)
    }

    async fn gc_expired_sessions(&self, now_millis: i64) -> Result<i64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now_millis)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Session GC failed: {}", e)))?;

        let deleted = result.rows_affected() as i64;

        info!(deleted_sessions = deleted, "Expired session GC completed");

        Ok(deleted)
    }

    async fn gc_orphaned_comments(&self) -> Result<i64> {
        // Comments reference items by ID without an FK; rows whose item was
        // deleted linger until this sweep
        let result = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE item_id NOT IN (SELECT id FROM items)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Comment GC failed: {}", e)))?;

        let deleted = result.rows_affected() as i64;

        info!(deleted_comments = deleted, "Orphaned comment GC completed");

        Ok(deleted)
    }

    async fn get_stats(&self) -> Result<MaintenanceStats> {
        let db_size_mb = self.get_db_size().await?;
        let db_size_bytes = (db_size_mb * 1024.0 * 1024.0) as i64;

        let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to count users: {}", e)))?;

        let item_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to count items: {}", e)))?;

        let session_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to count sessions: {}", e)))?;

        let comment_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to count comments: {}", e)))?;

        // Free pages as a share of all pages approximates fragmentation
        let page_count: i64 = sqlx::query_scalar("PRAGMA page_count")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get page count: {}", e)))?;

        let freelist_count: i64 = sqlx::query_scalar("PRAGMA freelist_count")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get freelist count: {}", e)))?;

        let fragmentation_percent = if page_count > 0 {
            (freelist_count as f64 / page_count as f64) * 100.0
        } else {
            0.0
        };

        Ok(MaintenanceStats {
            db_size_mb,
            db_size_bytes,
            user_count,
            item_count,
            session_count,
            comment_count,
            fragmentation_percent,
        })
    }
}
