//! Caching module for chart-search
//!
//! Result lists are cached per exact query string. The catalog does not
//! change while the server runs, so entries only age out by TTL.

use crate::catalog::SongRecord;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Cache for search results
pub struct ResultCache {
    cache: Cache<String, Arc<Vec<SongRecord>>>,
}

impl ResultCache {
    /// Create a new result cache with specified TTL
    pub fn new(ttl_seconds: u64, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        Self { cache }
    }

    /// Get a cached result
    pub async fn get(&self, query: &str) -> Option<Arc<Vec<SongRecord>>> {
        self.cache.get(query).await
    }

    /// Store a result in cache
    pub async fn set(&self, query: String, songs: Arc<Vec<SongRecord>>) {
        self.cache.insert(query, songs).await;
    }

    /// Clear the entire cache
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(300, 1000) // 5 minutes TTL, 1k queries
    }
}
