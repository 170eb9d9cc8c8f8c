//! Generation counters

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Live counters, updated lock-free by concurrent generators
#[derive(Debug, Default)]
pub struct GenerationStats {
    generated: AtomicU64,
    retries: AtomicU64,
    collisions: AtomicU64,
    reserved_hits: AtomicU64,
    weak_rejections: AtomicU64,
    malformed: AtomicU64,
    failures: AtomicU64,
}

/// Point-in-time copy of [`GenerationStats`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStatsSnapshot {
    /// IDs successfully issued
    pub generated: u64,
    /// Attempts beyond the first, summed over successful generations
    pub retries: u64,
    /// Candidates already present in the registry
    pub collisions: u64,
    /// Candidates that matched a reserved ID
    pub reserved_hits: u64,
    /// Candidates below their tier's entropy floor
    pub weak_rejections: u64,
    /// Candidates whose components did not form a valid ID
    pub malformed: u64,
    /// Generations that returned an error
    pub failures: u64,
}

impl GenerationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_success(&self, retries: u32) {
        self.generated.fetch_add(1, Ordering::Relaxed);
        self.retries.fetch_add(u64::from(retries), Ordering::Relaxed);
    }

    pub(crate) fn record_collision(&self) {
        self.collisions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_reserved(&self) {
        self.reserved_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_weak(&self) {
        self.weak_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_malformed(&self) {
        self.malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> GenerationStatsSnapshot {
        GenerationStatsSnapshot {
            generated: self.generated.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            collisions: self.collisions.load(Ordering::Relaxed),
            reserved_hits: self.reserved_hits.load(Ordering::Relaxed),
            weak_rejections: self.weak_rejections.load(Ordering::Relaxed),
            malformed: self.malformed.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_records() {
        let stats = GenerationStats::new();
        stats.record_success(0);
        stats.record_success(2);
        stats.record_collision();
        stats.record_collision();
        stats.record_failure();

        let snap = stats.snapshot();
        assert_eq!(snap.generated, 2);
        assert_eq!(snap.retries, 2);
        assert_eq!(snap.collisions, 2);
        assert_eq!(snap.failures, 1);
        assert_eq!(snap.reserved_hits, 0);
    }
}
