// Claim Service - queue semantics over the versioned store (Phase 2, ADR-009)

use crate::domain::user::UserId;
use crate::domain::ClaimQueue;
use crate::error::{AppError, Result};
use crate::port::{ClaimQueueStore, ReplaceOutcome};
use std::sync::Arc;
use tracing::{debug, warn};

/// Attempts per mutation before surfacing Conflict to the caller.
/// Each attempt reloads the queue, so a lost race only costs one round trip.
const REPLACE_ATTEMPTS: u32 = 3;

/// Claim queue use cases: join, leave, position, list.
///
/// Mutations run load -> mutate in memory -> versioned replace. A replace
/// that lost the version race is retried from a fresh load; a stale queue
/// is never written back blindly.
pub struct ClaimService {
    store: Arc<dyn ClaimQueueStore>,
}

impl ClaimService {
    pub fn new(store: Arc<dyn ClaimQueueStore>) -> Self {
        Self { store }
    }

    /// Append the claimant to the item's queue.
    ///
    /// Idempotent: a claimant already in the queue keeps their position and
    /// the call succeeds without writing.
    pub async fn join(&self, item_id: &str, claimant: &str) -> Result<()> {
        for attempt in 1..=REPLACE_ATTEMPTS {
            let snapshot = self.store.load_queue(item_id).await?;
            let mut queue = ClaimQueue::from_claimants(snapshot.claimants);

            if !queue.join(claimant) {
                debug!(item_id, claimant, "already in queue; join is a no-op");
                return Ok(());
            }

            match self
                .store
                .replace_queue(item_id, snapshot.version, queue.claimants())
                .await?
            {
                ReplaceOutcome::Applied => {
                    debug!(
                        item_id,
                        claimant,
                        position = queue.len(),
                        "joined claim queue"
                    );
                    return Ok(());
                }
                ReplaceOutcome::Conflict => {
                    warn!(item_id, claimant, attempt, "queue replace lost the race");
                }
            }
        }
        Err(Self::contended(item_id))
    }

    /// Remove the claimant from the item's queue.
    ///
    /// Idempotent: leaving a queue one is not in succeeds without writing.
    pub async fn leave(&self, item_id: &str, claimant: &str) -> Result<()> {
        for attempt in 1..=REPLACE_ATTEMPTS {
            let snapshot = self.store.load_queue(item_id).await?;
            let mut queue = ClaimQueue::from_claimants(snapshot.claimants);

            if !queue.leave(claimant) {
                debug!(item_id, claimant, "not in queue; leave is a no-op");
                return Ok(());
            }

            match self
                .store
                .replace_queue(item_id, snapshot.version, queue.claimants())
                .await?
            {
                ReplaceOutcome::Applied => {
                    debug!(item_id, claimant, "left claim queue");
                    return Ok(());
                }
                ReplaceOutcome::Conflict => {
                    warn!(item_id, claimant, attempt, "queue replace lost the race");
                }
            }
        }
        Err(Self::contended(item_id))
    }

    /// 1-based position of the claimant, `None` if not queued.
    ///
    /// Advisory read: the snapshot may be stale the moment it returns.
    pub async fn position(&self, item_id: &str, claimant: &str) -> Result<Option<u32>> {
        let snapshot = self.store.load_queue(item_id).await?;
        let queue = ClaimQueue::from_claimants(snapshot.claimants);
        Ok(queue.position_of(claimant))
    }

    /// Full queue order, head first.
    pub async fn list(&self, item_id: &str) -> Result<Vec<UserId>> {
        let snapshot = self.store.load_queue(item_id).await?;
        Ok(snapshot.claimants)
    }

    fn contended(item_id: &str) -> AppError {
        AppError::Conflict(format!(
            "claim queue for item {} is contended, retry the request",
            item_id
        ))
    }
}
