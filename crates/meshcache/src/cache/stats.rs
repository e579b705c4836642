use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for cache activity. Relaxed atomics, safe to read from any thread.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    sessions_opened: AtomicU64,
    sessions_kept: AtomicU64,
    sessions_discarded: AtomicU64,
    records_written: AtomicU64,
    records_replayed: AtomicU64,
    corrupt_files: AtomicU64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_session_opened(&self) {
        self.sessions_opened.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_session_kept(&self, records: u64) {
        self.sessions_kept.fetch_add(1, Ordering::Relaxed);
        self.records_written.fetch_add(records, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_session_discarded(&self) {
        self.sessions_discarded.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_replayed(&self, records: u64) {
        self.records_replayed.fetch_add(records, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_corrupt(&self) {
        self.corrupt_files.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn sessions_opened(&self) -> u64 {
        self.sessions_opened.load(Ordering::Relaxed)
    }

    pub fn sessions_kept(&self) -> u64 {
        self.sessions_kept.load(Ordering::Relaxed)
    }

    pub fn sessions_discarded(&self) -> u64 {
        self.sessions_discarded.load(Ordering::Relaxed)
    }

    /// Records persisted by sessions that were kept.
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }

    pub fn records_replayed(&self) -> u64 {
        self.records_replayed.load(Ordering::Relaxed)
    }

    pub fn corrupt_files(&self) -> u64 {
        self.corrupt_files.load(Ordering::Relaxed)
    }

    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 {
            0.0
        } else {
            hits / total
        }
    }
}
