//! SQLite-backed song store

use super::migrations::MIGRATIONS;
use super::{LoadInfo, LoadMode, SongStore};
use crate::catalog::{contains_ignore_case, NewSong, SongRecord};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Song store persisted in a single SQLite file
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        register_functions(&conn)?;
        apply_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::LockPoisoned)
    }
}

/// `contains_ci(haystack, needle)` does the matching so that `%` and `_`
/// in a query are taken literally and non-ASCII letters fold too.
fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "contains_ci",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let haystack: String = ctx.get(0)?;
            let needle: String = ctx.get(1)?;
            Ok(contains_ignore_case(&haystack, &needle))
        },
    )?;
    Ok(())
}

fn apply_migrations(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version")?;
    let applied: Vec<u32> = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    for migration in MIGRATIONS {
        if !applied.contains(&migration.version) {
            info!(
                "Applying migration {} ({})",
                migration.version, migration.name
            );
            conn.execute_batch(migration.sql)?;
            conn.execute(
                "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
        }
    }

    Ok(())
}

fn count_songs(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))?;
    Ok(usize::try_from(count).unwrap_or(0))
}

fn row_to_song(row: &rusqlite::Row) -> rusqlite::Result<SongRecord> {
    Ok(SongRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        performer: row.get(2)?,
        chart_debut: row.get(3)?,
        peak_position: row.get(4)?,
        time_on_chart: row.get(5)?,
    })
}

impl SongStore for SqliteStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn commit(&self, songs: &[NewSong], mode: LoadMode) -> Result<usize> {
        let mut conn = self.lock()?;
        // Dropping the transaction on any early return rolls it back.
        let tx = conn.transaction()?;

        let existing = count_songs(&tx)?;
        if existing > 0 {
            match mode {
                LoadMode::RejectNonEmpty => return Err(Error::StoreNotEmpty { count: existing }),
                LoadMode::Replace => {
                    debug!("Clearing {} existing songs", existing);
                    tx.execute("DELETE FROM songs", [])?;
                }
            }
        }

        {
            let mut stmt = tx.prepare(
                "INSERT INTO songs (title, performer, chart_debut, peak_position, time_on_chart)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for song in songs {
                stmt.execute(params![
                    song.title,
                    song.performer,
                    song.chart_debut,
                    song.peak_position,
                    song.time_on_chart,
                ])?;
            }
        }

        tx.execute(
            "INSERT INTO catalog_loads (loaded_at, record_count) VALUES (?1, ?2)",
            params![Utc::now().to_rfc3339(), i64::try_from(songs.len()).unwrap_or(i64::MAX)],
        )?;
        tx.commit()?;

        Ok(songs.len())
    }

    fn search(&self, needle: &str, limit: usize) -> Result<Vec<SongRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, title, performer, chart_debut, peak_position, time_on_chart
             FROM songs
             WHERE contains_ci(title, ?1) OR contains_ci(performer, ?1)
             ORDER BY peak_position ASC, chart_debut DESC, id ASC
             LIMIT ?2",
        )?;

        let songs = stmt
            .query_map(
                params![needle, i64::try_from(limit).unwrap_or(i64::MAX)],
                row_to_song,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(songs)
    }

    fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        count_songs(&conn)
    }

    fn last_load(&self) -> Result<Option<LoadInfo>> {
        let conn = self.lock()?;
        let info = conn
            .query_row(
                "SELECT loaded_at, record_count FROM catalog_loads ORDER BY id DESC LIMIT 1",
                [],
                |row| {
                    let loaded_at: String = row.get(0)?;
                    let record_count: i64 = row.get(1)?;
                    let loaded_at = DateTime::parse_from_rfc3339(&loaded_at)
                        .map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e))
                        })?
                        .with_timezone(&Utc);
                    Ok(LoadInfo {
                        loaded_at,
                        record_count: usize::try_from(record_count).unwrap_or(0),
                    })
                },
            )
            .optional()?;
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(title: &str, performer: &str, debut: &str, peak: i64) -> NewSong {
        NewSong {
            title: title.to_string(),
            performer: performer.to_string(),
            chart_debut: debut.to_string(),
            peak_position: peak,
            time_on_chart: 1,
        }
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let store = SqliteStore::open_in_memory().unwrap();
        let conn = store.lock().unwrap();
        apply_migrations(&conn).unwrap();
        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(versions, MIGRATIONS.len() as i64);
    }

    #[test]
    fn test_commit_and_search() {
        let store = SqliteStore::open_in_memory().unwrap();
        let written = store
            .commit(
                &[
                    song("Love Story", "Taylor Swift", "2008-09-27", 4),
                    song("Glove", "Someone", "1990-01-01", 40),
                    song("Shake It Off", "Taylor Swift", "2014-09-06", 1),
                ],
                LoadMode::Replace,
            )
            .unwrap();
        assert_eq!(written, 3);
        assert_eq!(store.count().unwrap(), 3);

        let titles: Vec<String> = store
            .search("LOVE", 100)
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Love Story", "Glove"]);

        let by_performer = store.search("taylor", 100).unwrap();
        assert_eq!(by_performer.len(), 2);
        assert_eq!(by_performer[0].title, "Shake It Off");
    }

    #[test]
    fn test_search_ordering_and_limit() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .commit(
                &[
                    song("a1", "x", "2001", 10),
                    song("a2", "x", "1999", 3),
                    song("a3", "x", "2005", 3),
                ],
                LoadMode::Replace,
            )
            .unwrap();

        let found = store.search("a", 100).unwrap();
        let order: Vec<(i64, &str)> = found
            .iter()
            .map(|s| (s.peak_position, s.chart_debut.as_str()))
            .collect();
        assert_eq!(order, vec![(3, "2005"), (3, "1999"), (10, "2001")]);

        assert_eq!(store.search("a", 2).unwrap().len(), 2);
    }

    #[test]
    fn test_wildcards_are_literal() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .commit(
                &[song("100% Pure Love", "Crystal Waters", "1994", 11), song("Plain", "x", "1990", 5)],
                LoadMode::Replace,
            )
            .unwrap();

        assert_eq!(store.search("%", 100).unwrap().len(), 1);
        assert!(store.search("_", 100).unwrap().is_empty());
    }

    #[test]
    fn test_replace_clears_and_keeps_ids_unique() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.commit(&[song("First", "x", "1990", 1)], LoadMode::Replace).unwrap();
        let old_id = store.search("first", 1).unwrap()[0].id;

        store.commit(&[song("Second", "x", "1991", 2)], LoadMode::Replace).unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert!(store.search("first", 100).unwrap().is_empty());
        assert_ne!(store.search("second", 1).unwrap()[0].id, old_id);
    }

    #[test]
    fn test_reject_non_empty() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.commit(&[song("First", "x", "1990", 1)], LoadMode::RejectNonEmpty).unwrap();

        let err = store
            .commit(&[song("Second", "x", "1991", 2)], LoadMode::RejectNonEmpty)
            .unwrap_err();
        assert!(matches!(err, Error::StoreNotEmpty { count: 1 }));
        assert_eq!(store.search("first", 100).unwrap().len(), 1);
    }

    #[test]
    fn test_failed_commit_leaves_store_untouched() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.commit(&[song("Keep", "x", "1990", 1)], LoadMode::Replace).unwrap();

        // The unique (title, performer) constraint aborts the batch midway.
        let result = store.commit(
            &[song("New", "x", "1991", 1), song("New", "x", "1992", 2)],
            LoadMode::Replace,
        );
        assert!(result.is_err());
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.search("keep", 100).unwrap().len(), 1);
        assert_eq!(store.last_load().unwrap().unwrap().record_count, 1);
    }

    #[test]
    fn test_last_load() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.last_load().unwrap().is_none());

        store
            .commit(&[song("a", "x", "1990", 1), song("b", "x", "1990", 1)], LoadMode::Replace)
            .unwrap();
        let info = store.last_load().unwrap().unwrap();
        assert_eq!(info.record_count, 2);
    }

    #[test]
    fn test_case_variants_are_distinct_songs() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .commit(&[song("Song", "x", "1990", 1), song("song", "x", "1990", 2)], LoadMode::Replace)
            .unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }
}
