//! Search execution against the song store

use super::models::{SearchOutcome, SongQuery};
use crate::cache::ResultCache;
use crate::catalog::SongRecord;
use crate::config::{SearchSettings, MAX_RESULTS};
use crate::error::Result;
use crate::metrics::Metrics;
use crate::store::SongStore;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::spawn_blocking;
use tracing::debug;

/// Query engine over a loaded, read-only store
pub struct SongSearch {
    /// Store holding the merged catalog
    store: Arc<dyn SongStore>,
    /// Cached result lists by query text
    cache: ResultCache,
    /// Request counters
    metrics: Arc<Metrics>,
    /// Results per search
    limit: usize,
}

impl SongSearch {
    /// Create a search over `store` with default limits
    pub fn new(store: Arc<dyn SongStore>) -> Self {
        Self {
            store,
            cache: ResultCache::default(),
            metrics: Arc::new(Metrics::new()),
            limit: MAX_RESULTS,
        }
    }

    /// Create a search configured from settings
    pub fn with_settings(store: Arc<dyn SongStore>, settings: &SearchSettings) -> Self {
        Self {
            store,
            cache: ResultCache::new(settings.cache_ttl_secs, settings.cache_capacity),
            metrics: Arc::new(Metrics::new()),
            limit: settings.result_limit(),
        }
    }

    /// Share an existing metrics collector
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set the result cap, clamped to [`MAX_RESULTS`]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(MAX_RESULTS);
        self
    }

    pub fn store(&self) -> &Arc<dyn SongStore> {
        &self.store
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Run a search for an optional query fragment.
    ///
    /// Absent or empty input yields [`SearchOutcome::NotSearched`]; any other
    /// text is matched against title and performer ignoring case.
    pub async fn search(&self, raw: Option<&str>) -> Result<SearchOutcome> {
        let Some(query) = SongQuery::parse(raw) else {
            self.metrics.inc_not_searched();
            return Ok(SearchOutcome::NotSearched);
        };

        self.metrics.inc_search();

        let songs = match self.cache.get(&query.text).await {
            Some(cached) => {
                self.metrics.inc_cache_hit();
                debug!("Cache hit for '{}'", query.text);
                cached
            }
            None => {
                let songs = Arc::new(self.lookup(&query).await?);
                self.cache.set(query.text.clone(), Arc::clone(&songs)).await;
                songs
            }
        };

        debug!("Search '{}' matched {} songs", query.text, songs.len());

        let outcome = SearchOutcome::from_results(query.text, songs.to_vec());
        if outcome.songs().is_empty() {
            self.metrics.inc_no_matches();
        }
        Ok(outcome)
    }

    /// Run the store query off the async workers
    async fn lookup(&self, query: &SongQuery) -> Result<Vec<SongRecord>> {
        let store = Arc::clone(&self.store);
        let text = query.text.clone();
        let limit = self.limit;

        let start = Instant::now();
        let songs = spawn_blocking(move || store.search(&text, limit)).await??;
        self.metrics
            .record_response_time(u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX));

        Ok(songs)
    }
}
