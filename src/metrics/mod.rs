//! Metrics collection module
//!
//! Tracks how searches were answered and how long store lookups take.

use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Response times kept for the rolling average
const RESPONSE_WINDOW: usize = 100;

/// Search counters shared by all requests
pub struct Metrics {
    /// Requests that ran a search
    total_searches: AtomicU64,
    /// Requests with no query text
    not_searched: AtomicU64,
    /// Searches that matched nothing
    no_matches: AtomicU64,
    /// Searches answered from the result cache
    cache_hits: AtomicU64,
    /// Store lookup times in ms, most recent last
    response_times: Mutex<VecDeque<u64>>,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            total_searches: AtomicU64::new(0),
            not_searched: AtomicU64::new(0),
            no_matches: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            response_times: Mutex::new(VecDeque::with_capacity(RESPONSE_WINDOW)),
        }
    }

    pub fn inc_search(&self) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_not_searched(&self) {
        self.not_searched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_no_matches(&self) {
        self.no_matches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a store lookup time
    pub fn record_response_time(&self, time_ms: u64) {
        // A poisoned window only loses a sample
        if let Ok(mut times) = self.response_times.lock() {
            if times.len() >= RESPONSE_WINDOW {
                times.pop_front();
            }
            times.push_back(time_ms);
        }
    }

    /// Average store lookup time over the recent window
    pub fn avg_response_time(&self) -> Option<u64> {
        let times = self.response_times.lock().ok()?;
        if times.is_empty() {
            None
        } else {
            Some(times.iter().sum::<u64>() / times.len() as u64)
        }
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_searches: self.total_searches.load(Ordering::Relaxed),
            not_searched: self.not_searched.load(Ordering::Relaxed),
            no_matches: self.no_matches.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            avg_response_time_ms: self.avg_response_time(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable view of [`Metrics`]
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_searches: u64,
    pub not_searched: u64,
    pub no_matches: u64,
    pub cache_hits: u64,
    pub avg_response_time_ms: Option<u64>,
}
