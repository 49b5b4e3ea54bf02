//! Song storage
//!
//! The loader and the query engine both talk to a [`SongStore`] handed to
//! them explicitly. Two backends exist: SQLite on disk and an in-process
//! snapshot.

mod memory;
mod migrations;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::catalog::{NewSong, SongRecord};
use crate::config::{DatabaseBackend, DatabaseSettings};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// What a load does when the store already holds songs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Drop the existing songs and write the new set in the same commit
    #[default]
    Replace,
    /// Refuse to load and leave the store untouched
    RejectNonEmpty,
}

/// Bookkeeping for the most recent successful load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadInfo {
    pub loaded_at: DateTime<Utc>,
    pub record_count: usize,
}

/// Storage backend for merged songs
pub trait SongStore: Send + Sync {
    /// Backend name for logs and the stats page
    fn name(&self) -> &'static str;

    /// Persist a merged song set as one atomic batch.
    ///
    /// Either every song becomes visible or none does. Returns the number
    /// of songs written.
    fn commit(&self, songs: &[NewSong], mode: LoadMode) -> Result<usize>;

    /// Songs whose title or performer contains `needle`, ignoring case,
    /// in chart order and capped at `limit`
    fn search(&self, needle: &str, limit: usize) -> Result<Vec<SongRecord>>;

    /// Number of stored songs
    fn count(&self) -> Result<usize>;

    /// The most recent successful load, if any
    fn last_load(&self) -> Result<Option<LoadInfo>>;
}

/// Open the backend named in the settings
pub fn open(settings: &DatabaseSettings) -> Result<Arc<dyn SongStore>> {
    let store: Arc<dyn SongStore> = match settings.backend {
        DatabaseBackend::Sqlite => {
            info!("Opening SQLite store at {}", settings.path.display());
            Arc::new(SqliteStore::open(&settings.path)?)
        }
        DatabaseBackend::Memory => {
            info!("Using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(store)
}
