// Claim Queue Store Port (Phase 2, ADR-009)
// Versioned read/replace of one item's claim queue; the unit of atomicity
// for every queue mutation.

use crate::domain::user::UserId;
use crate::error::Result;
use async_trait::async_trait;

/// A queue read paired with the version token it was read at
#[derive(Debug, Clone)]
pub struct QueueSnapshot {
    pub claimants: Vec<UserId>,
    pub version: i64,
}

/// Outcome of a versioned replace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// Stored version matched; queue overwritten, version bumped
    Applied,
    /// Stored version moved on since the snapshot; nothing written
    Conflict,
}

/// Store interface for claim queues.
///
/// `replace_queue` overwrites the whole sequence (no append/remove
/// primitive); callers read, compute the new order in memory, and write it
/// back under the version check. A replace that lost the race reports
/// `Conflict` without touching the row.
#[async_trait]
pub trait ClaimQueueStore: Send + Sync {
    /// Read the current queue and its version.
    ///
    /// # Errors
    /// - `AppError::NotFound` if no item with `item_id` exists
    async fn load_queue(&self, item_id: &str) -> Result<QueueSnapshot>;

    /// Overwrite the queue iff the stored version equals `expected_version`.
    ///
    /// # Errors
    /// - `AppError::NotFound` if no item with `item_id` exists
    async fn replace_queue(
        &self,
        item_id: &str,
        expected_version: i64,
        claimants: &[UserId],
    ) -> Result<ReplaceOutcome>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory store with injectable version conflicts.
    ///
    /// `fail_next_replaces(n)` makes the next n replace calls report
    /// `Conflict` while still bumping the stored version, imitating a
    /// concurrent writer landing first.
    pub struct MemClaimQueueStore {
        rows: Mutex<HashMap<String, (Vec<UserId>, i64)>>,
        forced_conflicts: AtomicUsize,
        replace_calls: AtomicUsize,
    }

    impl MemClaimQueueStore {
        pub fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
                forced_conflicts: AtomicUsize::new(0),
                replace_calls: AtomicUsize::new(0),
            }
        }

        /// Seed an item with an existing queue (version 0)
        pub fn with_item(self, item_id: impl Into<String>, claimants: Vec<UserId>) -> Self {
            self.rows
                .lock()
                .unwrap()
                .insert(item_id.into(), (claimants, 0));
            self
        }

        pub fn fail_next_replaces(&self, n: usize) {
            self.forced_conflicts.store(n, Ordering::SeqCst);
        }

        pub fn replace_calls(&self) -> usize {
            self.replace_calls.load(Ordering::SeqCst)
        }

        pub fn stored_claimants(&self, item_id: &str) -> Option<Vec<UserId>> {
            self.rows
                .lock()
                .unwrap()
                .get(item_id)
                .map(|(claimants, _)| claimants.clone())
        }
    }

    impl Default for MemClaimQueueStore {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ClaimQueueStore for MemClaimQueueStore {
        async fn load_queue(&self, item_id: &str) -> Result<QueueSnapshot> {
            let rows = self.rows.lock().unwrap();
            let (claimants, version) = rows
                .get(item_id)
                .ok_or_else(|| AppError::item_not_found(item_id))?;
            Ok(QueueSnapshot {
                claimants: claimants.clone(),
                version: *version,
            })
        }

        async fn replace_queue(
            &self,
            item_id: &str,
            expected_version: i64,
            claimants: &[UserId],
        ) -> Result<ReplaceOutcome> {
            self.replace_calls.fetch_add(1, Ordering::SeqCst);

            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .get_mut(item_id)
                .ok_or_else(|| AppError::item_not_found(item_id))?;

            if self
                .forced_conflicts
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                // A concurrent writer got in first: version moves, write lost
                row.1 += 1;
                return Ok(ReplaceOutcome::Conflict);
            }

            if row.1 != expected_version {
                return Ok(ReplaceOutcome::Conflict);
            }
            row.0 = claimants.to_vec();
            row.1 += 1;
            Ok(ReplaceOutcome::Applied)
        }
    }
}
