// Claim Queue Domain Model (Phase 2)

use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Ordered FIFO waitlist of claimants for one item.
///
/// Invariants:
/// - No claimant appears twice.
/// - Order changes only by append (join) or removal (leave); never reordered.
/// - Position is the 1-based index of a claimant; absent claimants have none.
///
/// Serializes as a plain JSON array of user IDs (stored as-is in the
/// `items.claim_queue` column).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimQueue(Vec<UserId>);

impl ClaimQueue {
    /// Empty queue (every new item starts with one)
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Rebuild a queue from its stored order. Trusts the input: the store
    /// wrote it through `join`/`leave`, so it is already duplicate-free.
    pub fn from_claimants(claimants: Vec<UserId>) -> Self {
        Self(claimants)
    }

    /// Append a claimant at the tail.
    ///
    /// Returns `false` without modifying the queue if the claimant is
    /// already present (idempotent join).
    pub fn join(&mut self, claimant: impl Into<UserId>) -> bool {
        let claimant = claimant.into();
        if self.contains(&claimant) {
            return false;
        }
        self.0.push(claimant);
        true
    }

    /// Remove every occurrence of a claimant, preserving the order of the
    /// rest. Returns `false` if the claimant was not present.
    pub fn leave(&mut self, claimant: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c != claimant);
        self.0.len() != before
    }

    /// 1-based position of the claimant's first occurrence, `None` if absent.
    pub fn position_of(&self, claimant: &str) -> Option<u32> {
        self.0
            .iter()
            .position(|c| c == claimant)
            .map(|idx| idx as u32 + 1)
    }

    pub fn contains(&self, claimant: &str) -> bool {
        self.0.iter().any(|c| c == claimant)
    }

    /// Full current order, head first ("who is ahead of me")
    pub fn claimants(&self) -> &[UserId] {
        &self.0
    }

    pub fn into_claimants(self) -> Vec<UserId> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
