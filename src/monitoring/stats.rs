/*!
 * Delegate Statistics
 * Atomic counters updated from `broadcast(&self)` without locking
 */

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of a registry's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateStats {
    pub broadcasts: u64,
    pub invocations: u64,
    pub stale_skips: u64,
    pub listeners_added: u64,
    pub listeners_removed: u64,
    pub duplicates_ignored: u64,
}

/// Atomic delegate statistics
///
/// # Performance
/// - Cache-line aligned to keep broadcast counters off neighbouring data
/// - Relaxed ordering: counters are monotonic and read only as snapshots
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct AtomicDelegateStats {
    broadcasts: AtomicU64,
    invocations: AtomicU64,
    stale_skips: AtomicU64,
    listeners_added: AtomicU64,
    listeners_removed: AtomicU64,
    duplicates_ignored: AtomicU64,
}

impl AtomicDelegateStats {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hot path - called once per broadcast
    #[inline(always)]
    pub fn inc_broadcasts(&self) {
        self.broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    /// Hot path - called once per broadcast with the delivered count
    #[inline(always)]
    pub fn add_invocations(&self, count: u64) {
        if count > 0 {
            self.invocations.fetch_add(count, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn add_stale_skips(&self, count: u64) {
        if count > 0 {
            self.stale_skips.fetch_add(count, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn inc_listeners_added(&self) {
        self.listeners_added.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn add_listeners_removed(&self, count: u64) {
        if count > 0 {
            self.listeners_removed.fetch_add(count, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn inc_duplicates_ignored(&self) {
        self.duplicates_ignored.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a snapshot of all counters
    pub fn snapshot(&self) -> DelegateStats {
        DelegateStats {
            broadcasts: self.broadcasts.load(Ordering::Relaxed),
            invocations: self.invocations.load(Ordering::Relaxed),
            stale_skips: self.stale_skips.load(Ordering::Relaxed),
            listeners_added: self.listeners_added.load(Ordering::Relaxed),
            listeners_removed: self.listeners_removed.load(Ordering::Relaxed),
            duplicates_ignored: self.duplicates_ignored.load(Ordering::Relaxed),
        }
    }
}
