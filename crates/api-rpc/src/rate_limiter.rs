//! Rate Limiter (Token Bucket Algorithm)
//!
//! Caps the request rate on mutating RPC methods. Token count and refill
//! stamp live in one atomic word so concurrent callers never take a lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

// Bucket state packed into a single u64:
//   bits 48..64  remaining tokens (burst is capped at u16::MAX)
//   bits  0..48  last refill stamp, milliseconds since limiter creation
//
// 48 bits of milliseconds covers ~8900 years of uptime, so the stamp
// never wraps within a daemon's lifetime.
const STAMP_BITS: u32 = 48;
const STAMP_MASK: u64 = (1 << STAMP_BITS) - 1;

fn pack(tokens: u16, stamp_ms: u64) -> u64 {
    ((tokens as u64) << STAMP_BITS) | (stamp_ms & STAMP_MASK)
}

fn unpack(word: u64) -> (u16, u64) {
    ((word >> STAMP_BITS) as u16, word & STAMP_MASK)
}

/// Token bucket shared by all RPC connections.
pub struct RateLimiter {
    state: AtomicU64,
    epoch: Instant,
    burst: u16,
    refill_per_sec: u32,
}

impl RateLimiter {
    /// `burst` is the bucket capacity, `refill_per_sec` the sustained rate.
    pub fn new(burst: u16, refill_per_sec: u32) -> Self {
        Self {
            state: AtomicU64::new(pack(burst, 0)),
            epoch: Instant::now(),
            burst,
            refill_per_sec,
        }
    }

    /// Try to take one token. Returns false when the bucket is empty.
    pub fn try_acquire(&self) -> bool {
        let now_ms = self.epoch.elapsed().as_millis() as u64 & STAMP_MASK;

        loop {
            let current = self.state.load(Ordering::Acquire);
            let (tokens, stamp_ms) = unpack(current);

            let elapsed_ms = now_ms.saturating_sub(stamp_ms);
            let refilled = (elapsed_ms * self.refill_per_sec as u64) / 1000;
            let available = (tokens as u64 + refilled).min(self.burst as u64) as u16;

            if available == 0 {
                // Keep the old stamp so partial refill intervals accumulate.
                return false;
            }

            // Advance the stamp only when refill produced whole tokens,
            // otherwise sub-second elapsed time would be discarded on
            // every acquire and a busy caller could starve the refill.
            let next_stamp = if refilled > 0 { now_ms } else { stamp_ms };
            let next = pack(available - 1, next_stamp);

            if self
                .state
                .compare_exchange(current, next, Ordering::Release, Ordering::Acquire)
                .is_ok()
            {
                return true;
            }
            // Lost the race, re-read and retry.
        }
    }

    /// Tokens currently in the bucket, ignoring pending refill.
    #[allow(dead_code)] // Surfaced through admin.stats.v1 when metrics land
    pub fn remaining(&self) -> u16 {
        unpack(self.state.load(Ordering::Acquire)).0
    }
}
