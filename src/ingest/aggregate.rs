//! Merging of duplicate chart rows

use crate::catalog::{NewSong, RawRow, SongKey};
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Collects raw rows into one merged song per (title, performer).
///
/// The first row seen for a key fixes its debut; later rows can only
/// lower the peak position and raise the time on chart.
#[derive(Debug, Default)]
pub struct Aggregator {
    /// Key -> position in `songs`
    index: HashMap<SongKey, usize>,
    /// Merged songs in first-seen order
    songs: Vec<NewSong>,
    /// Rows consumed so far
    rows: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one row into the aggregate, failing on a non-integer field
    pub fn add_row(&mut self, row: &RawRow) -> Result<()> {
        self.rows += 1;
        let peak_position = parse_int(self.rows, "peak_position", &row.peak_position)?;
        let time_on_chart = parse_int(self.rows, "time_on_chart", &row.time_on_chart)?;

        let key = row.key();
        if let Some(&pos) = self.index.get(&key) {
            let existing = &mut self.songs[pos];
            existing.peak_position = existing.peak_position.min(peak_position);
            existing.time_on_chart = existing.time_on_chart.max(time_on_chart);
        } else {
            self.index.insert(key, self.songs.len());
            self.songs.push(NewSong {
                title: row.song.clone(),
                performer: row.performer.clone(),
                chart_debut: row.chart_debut.clone(),
                peak_position,
                time_on_chart,
            });
        }

        Ok(())
    }

    /// Fold many rows, stopping at the first bad one
    pub fn extend_rows<'a>(&mut self, rows: impl IntoIterator<Item = &'a RawRow>) -> Result<()> {
        for row in rows {
            self.add_row(row)?;
        }
        Ok(())
    }

    /// Number of rows consumed
    pub fn rows_read(&self) -> usize {
        self.rows
    }

    /// Number of distinct songs so far
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// The merged songs in first-seen order
    pub fn into_songs(self) -> Vec<NewSong> {
        self.songs
    }
}

fn parse_int(row: usize, field: &'static str, value: &str) -> Result<i64> {
    value.trim().parse().map_err(|_| Error::InvalidInteger {
        row,
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_first_debut_min_peak_max_weeks() {
        let mut agg = Aggregator::new();
        agg.extend_rows(&[
            RawRow::new("A", "X", "2020-01", 5, 10),
            RawRow::new("A", "X", "2020-01", 2, 3),
        ])
        .unwrap();

        let songs = agg.into_songs();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].peak_position, 2);
        assert_eq!(songs[0].time_on_chart, 10);
        assert_eq!(songs[0].chart_debut, "2020-01");
    }

    #[test]
    fn test_later_debut_is_ignored() {
        let mut agg = Aggregator::new();
        agg.extend_rows(&[
            RawRow::new("A", "X", "2020-05", 5, 1),
            RawRow::new("A", "X", "2019-01", 5, 1),
        ])
        .unwrap();
        assert_eq!(agg.into_songs()[0].chart_debut, "2020-05");
    }

    #[test]
    fn test_keys_are_exact() {
        let mut agg = Aggregator::new();
        agg.extend_rows(&[
            RawRow::new("Song", "X", "2020", 1, 1),
            RawRow::new("song", "X", "2020", 1, 1),
            RawRow::new("Song", "x", "2020", 1, 1),
            RawRow::new("Song", "X", "2021", 3, 2),
        ])
        .unwrap();
        assert_eq!(agg.rows_read(), 4);
        assert_eq!(agg.len(), 3);
    }

    #[test]
    fn test_first_seen_order() {
        let mut agg = Aggregator::new();
        agg.extend_rows(&[
            RawRow::new("B", "X", "2020", 1, 1),
            RawRow::new("A", "X", "2020", 1, 1),
            RawRow::new("B", "X", "2020", 1, 1),
        ])
        .unwrap();
        let titles: Vec<String> = agg.into_songs().into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_integers_tolerate_padding() {
        let mut agg = Aggregator::new();
        agg.add_row(&RawRow::new("A", "X", "2020", " 7 ", "+3")).unwrap();
        let songs = agg.into_songs();
        assert_eq!(songs[0].peak_position, 7);
        assert_eq!(songs[0].time_on_chart, 3);
    }

    #[test]
    fn test_bad_integer_reports_row_and_field() {
        let mut agg = Aggregator::new();
        let err = agg
            .extend_rows(&[
                RawRow::new("A", "X", "2020", 1, 1),
                RawRow::new("B", "X", "2020", 1, "many"),
            ])
            .unwrap_err();

        match err {
            Error::InvalidInteger { row, field, value } => {
                assert_eq!(row, 2);
                assert_eq!(field, "time_on_chart");
                assert_eq!(value, "many");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
