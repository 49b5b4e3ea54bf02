//! One-shot catalog loader

use super::aggregate::Aggregator;
use super::reader::read_rows_from_path;
use crate::catalog::RawRow;
use crate::error::Result;
use crate::store::{LoadMode, SongStore};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Outcome of a successful load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Raw rows consumed
    pub rows_read: usize,
    /// Merged songs committed
    pub songs_written: usize,
}

/// Populates a store from raw chart rows
pub struct Loader {
    store: Arc<dyn SongStore>,
    mode: LoadMode,
}

impl Loader {
    pub fn new(store: Arc<dyn SongStore>) -> Self {
        Self {
            store,
            mode: LoadMode::default(),
        }
    }

    /// Set what happens when the store already holds songs
    pub fn with_mode(mut self, mode: LoadMode) -> Self {
        self.mode = mode;
        self
    }

    /// Merge `rows` and commit them as a single batch.
    ///
    /// Every row is parsed before anything is written, so a bad integer
    /// leaves the store exactly as it was.
    pub fn load(&self, rows: &[RawRow]) -> Result<LoadReport> {
        let start = Instant::now();

        let mut aggregator = Aggregator::new();
        aggregator.extend_rows(rows)?;
        let rows_read = aggregator.rows_read();
        let songs = aggregator.into_songs();

        let songs_written = self.store.commit(&songs, self.mode)?;

        info!(
            "Loaded {} songs from {} rows into {} store in {:?}",
            songs_written,
            rows_read,
            self.store.name(),
            start.elapsed()
        );

        Ok(LoadReport {
            rows_read,
            songs_written,
        })
    }

    /// Read a CSV export and load it
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let path = path.as_ref();
        info!("Reading chart rows from {}", path.display());
        let rows = read_rows_from_path(path)?;
        self.load(&rows)
    }
}
