//! Admin Surface - operational statistics and manual maintenance

use super::RpcHandler;
use crate::error::to_rpc_error;
use crate::types::{MaintenanceRequest, MaintenanceResponse, StatsRequest, StatsResponse};
use jsonrpsee::types::ErrorObjectOwned;

impl RpcHandler {
    /// admin.stats.v1
    pub async fn stats(&self, _params: StatsRequest) -> Result<StatsResponse, ErrorObjectOwned> {
        let stats = self
            .ctx
            .maintenance
            .get_stats()
            .await
            .map_err(to_rpc_error)?;

        Ok(StatsResponse {
            user_count: stats.user_count,
            item_count: stats.item_count,
            session_count: stats.session_count,
            comment_count: stats.comment_count,
            db_size_bytes: stats.db_size_bytes,
            fragmentation_percent: stats.fragmentation_percent,
            uptime_seconds: self.uptime_seconds(),
        })
    }

    /// admin.maintenance.v1
    pub async fn run_maintenance(
        &self,
        params: MaintenanceRequest,
    ) -> Result<MaintenanceResponse, ErrorObjectOwned> {
        let stats_before = self
            .ctx
            .maintenance
            .get_stats()
            .await
            .map_err(to_rpc_error)?;

        // Run VACUUM if forced or needed
        let vacuum_run = if params.force_vacuum || stats_before.fragmentation_percent > 10.0 {
            self.ctx.maintenance.vacuum().await.map_err(to_rpc_error)?;
            true
        } else {
            false
        };

        let now = self.ctx.time_provider.now_millis();
        let sessions_deleted = self
            .ctx
            .maintenance
            .gc_expired_sessions(now)
            .await
            .map_err(to_rpc_error)?;

        let comments_deleted = self
            .ctx
            .maintenance
            .gc_orphaned_comments()
            .await
            .map_err(to_rpc_error)?;

        let stats_after = self
            .ctx
            .maintenance
            .get_stats()
            .await
            .map_err(to_rpc_error)?;

        Ok(MaintenanceResponse {
            vacuum_run,
            sessions_deleted,
            comments_deleted,
            db_size_before: stats_before.db_size_bytes,
            db_size_after: stats_after.db_size_bytes,
        })
    }
}
