//! In-process song store
//!
//! Readers clone an `Arc` to the current snapshot; a commit builds the next
//! snapshot completely before swapping it in, so a search never sees a
//! half-loaded catalog.

use super::{LoadInfo, LoadMode, SongStore};
use crate::catalog::{NewSong, SongRecord};
use crate::error::{Error, Result};
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct Snapshot {
    songs: Vec<SongRecord>,
    last_load: Option<LoadInfo>,
}

/// Song store held entirely in memory
#[derive(Debug)]
pub struct MemoryStore {
    snapshot: RwLock<Arc<Snapshot>>,
    next_id: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
            next_id: AtomicI64::new(1),
        }
    }

    fn current(&self) -> Result<Arc<Snapshot>> {
        self.snapshot
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|_| Error::LockPoisoned)
    }
}

impl SongStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn commit(&self, songs: &[NewSong], mode: LoadMode) -> Result<usize> {
        let mut guard = self.snapshot.write().map_err(|_| Error::LockPoisoned)?;

        let existing = guard.songs.len();
        if existing > 0 && mode == LoadMode::RejectNonEmpty {
            return Err(Error::StoreNotEmpty { count: existing });
        }

        let records: Vec<SongRecord> = songs
            .iter()
            .cloned()
            .map(|song| song.into_record(self.next_id.fetch_add(1, Ordering::Relaxed)))
            .collect();

        *guard = Arc::new(Snapshot {
            last_load: Some(LoadInfo {
                loaded_at: Utc::now(),
                record_count: records.len(),
            }),
            songs: records,
        });

        Ok(songs.len())
    }

    fn search(&self, needle: &str, limit: usize) -> Result<Vec<SongRecord>> {
        let snapshot = self.current()?;
        let mut found: Vec<SongRecord> = snapshot
            .songs
            .iter()
            .filter(|song| song.matches(needle))
            .cloned()
            .collect();
        found.sort_by(SongRecord::chart_order);
        found.truncate(limit);
        Ok(found)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.current()?.songs.len())
    }

    fn last_load(&self) -> Result<Option<LoadInfo>> {
        Ok(self.current()?.last_load.clone())
    }
}
