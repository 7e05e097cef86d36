// Maintenance Service (Phase 4 - ADR-040)
// Scheduled maintenance operations for the DB

use crate::application::shutdown::ShutdownToken;
use crate::error::Result;
use crate::port::{Maintenance, MaintenanceConfig, TimeProvider};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info};

/// Maintenance scheduler
///
/// Runs periodic maintenance operations (session GC, orphan GC, VACUUM)
/// in the background
pub struct MaintenanceScheduler {
    maintenance: Arc<dyn Maintenance>,
    time_provider: Arc<dyn TimeProvider>,
    config: MaintenanceConfig,
    interval_hours: u64,
}

impl MaintenanceScheduler {
    /// Create a new maintenance scheduler
    ///
    /// # Arguments
    /// * `maintenance` - Maintenance implementation
    /// * `time_provider` - Clock for expiry cutoffs
    /// * `config` - Maintenance configuration
    /// * `interval_hours` - How often to run maintenance (hours)
    pub fn new(
        maintenance: Arc<dyn Maintenance>,
        time_provider: Arc<dyn TimeProvider>,
        config: MaintenanceConfig,
        interval_hours: u64,
    ) -> Self {
        Self {
            maintenance,
            time_provider,
            config,
            interval_hours,
        }
    }

    /// Run maintenance loop (background task)
    ///
    /// Runs full maintenance every interval_hours until shutdown.
    /// Should be spawned in tokio::spawn
    pub async fn run(self, mut shutdown: ShutdownToken) {
        info!(
            interval_hours = self.interval_hours,
            max_db_size_mb = self.config.max_db_size_mb,
            "Maintenance scheduler started"
        );

        let mut tick = interval(Duration::from_secs(self.interval_hours * 3600));
        // the first tick fires immediately; skip it so startup stays fast
        tick.tick().await;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    info!("Running scheduled maintenance...");

                    let now = self.time_provider.now_millis();
                    match self.maintenance.run_full_maintenance(&self.config, now).await {
                        Ok(stats) => {
                            info!(
                                db_size_mb = stats.db_size_mb,
                                users = stats.user_count,
                                items = stats.item_count,
                                sessions = stats.session_count,
                                "Scheduled maintenance completed successfully"
                            );
                        }
                        Err(e) => {
                            error!(error = ?e, "Scheduled maintenance failed");
                        }
                    }
                }
                _ = shutdown.wait() => {
                    info!("Maintenance scheduler stopping");
                    break;
                }
            }
        }
    }

    /// Run maintenance immediately (for manual trigger)
    pub async fn run_now(&self) -> Result<()> {
        info!("Running manual maintenance...");

        let now = self.time_provider.now_millis();
        let stats = self.maintenance.run_full_maintenance(&self.config, now).await?;

        info!(
            db_size_mb = stats.db_size_mb,
            users = stats.user_count,
            items = stats.item_count,
            "Manual maintenance completed"
        );

        Ok(())
    }
}
