// DB Maintenance port (Phase 4 - ADR-040)
use crate::error::Result;
use async_trait::async_trait;

/// Database maintenance statistics
#[derive(Debug, Clone)]
pub struct MaintenanceStats {
    pub db_size_mb: f64,
    pub db_size_bytes: i64,
    pub user_count: i64,
    pub item_count: i64,
    pub session_count: i64,
    pub comment_count: i64,
    pub fragmentation_percent: f64,
}

/// Maintenance configuration
#[derive(Debug, Clone)]
pub struct MaintenanceConfig {
    /// Maximum DB size before forcing VACUUM (MB)
    pub max_db_size_mb: f64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            max_db_size_mb: 500.0, // 500MB max before VACUUM
        }
    }
}

/// Database maintenance operations
#[async_trait]
pub trait Maintenance: Send + Sync {
    /// Run VACUUM to reclaim space and optimize DB
    ///
    /// # Returns
    /// Space reclaimed in MB
    async fn vacuum(&self) -> Result<f64>;

    /// Delete sessions whose expiry is at or before `now_millis`
    ///
    /// # Returns
    /// Number of sessions deleted
    async fn gc_expired_sessions(&self, now_millis: i64) -> Result<i64>;

    /// Delete comments whose item no longer exists
    ///
    /// # Returns
    /// Number of comments deleted
    async fn gc_orphaned_comments(&self) -> Result<i64>;

    /// Get maintenance statistics
    async fn get_stats(&self) -> Result<MaintenanceStats>;

    /// Run full maintenance (GC + conditional VACUUM)
    async fn run_full_maintenance(
        &self,
        config: &MaintenanceConfig,
        now_millis: i64,
    ) -> Result<MaintenanceStats> {
        // 1. Get pre-maintenance stats
        let stats_before = self.get_stats().await?;

        // 2. GC expired sessions
        let deleted_sessions = self.gc_expired_sessions(now_millis).await?;

        // 3. GC comments orphaned by item deletion
        let deleted_comments = self.gc_orphaned_comments().await?;

        // 4. VACUUM if DB is large
        let reclaimed_mb = if stats_before.db_size_mb > config.max_db_size_mb {
            self.vacuum().await?
        } else {
            0.0
        };

        // 5. Get post-maintenance stats
        let stats_after = self.get_stats().await?;

        tracing::info!(
            deleted_sessions = deleted_sessions,
            deleted_comments = deleted_comments,
            reclaimed_mb = reclaimed_mb,
            db_size_mb = stats_after.db_size_mb,
            "Maintenance completed"
        );

        Ok(stats_after)
    }
}
