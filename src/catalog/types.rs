//! Song record types

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One row of the chart export, fields kept as text until aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// Song title
    pub song: String,
    /// Credited performer
    pub performer: String,
    /// Date-like string of the first charting week
    pub chart_debut: String,
    /// Best rank reached, must parse as an integer
    pub peak_position: String,
    /// Weeks on chart, must parse as an integer
    pub time_on_chart: String,
}

impl RawRow {
    pub fn new(
        song: impl Into<String>,
        performer: impl Into<String>,
        chart_debut: impl Into<String>,
        peak_position: impl ToString,
        time_on_chart: impl ToString,
    ) -> Self {
        Self {
            song: song.into(),
            performer: performer.into(),
            chart_debut: chart_debut.into(),
            peak_position: peak_position.to_string(),
            time_on_chart: time_on_chart.to_string(),
        }
    }

    /// Dedup identity of this row
    pub fn key(&self) -> SongKey {
        SongKey::new(&self.song, &self.performer)
    }
}

/// Exact, case-sensitive (title, performer) identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SongKey {
    pub title: String,
    pub performer: String,
}

impl SongKey {
    pub fn new(title: impl Into<String>, performer: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            performer: performer.into(),
        }
    }
}

/// A merged song that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSong {
    pub title: String,
    pub performer: String,
    pub chart_debut: String,
    pub peak_position: i64,
    pub time_on_chart: i64,
}

impl NewSong {
    pub fn key(&self) -> SongKey {
        SongKey::new(&self.title, &self.performer)
    }

    /// Attach a store-assigned identifier
    pub fn into_record(self, id: i64) -> SongRecord {
        SongRecord {
            id,
            title: self.title,
            performer: self.performer,
            chart_debut: self.chart_debut,
            peak_position: self.peak_position,
            time_on_chart: self.time_on_chart,
        }
    }
}

/// A persisted song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    /// Store-assigned identifier, never reused
    pub id: i64,
    pub title: String,
    pub performer: String,
    pub chart_debut: String,
    /// Lower is better, 1 is the top of the chart
    pub peak_position: i64,
    pub time_on_chart: i64,
}

impl SongRecord {
    /// Result ordering: best peak first, then most recent debut string.
    ///
    /// The debut comparison is plain string ordering, not date parsing.
    /// Ties on both keys fall back to the identifier so output is stable.
    pub fn chart_order(&self, other: &Self) -> Ordering {
        self.peak_position
            .cmp(&other.peak_position)
            .then_with(|| other.chart_debut.cmp(&self.chart_debut))
            .then_with(|| self.id.cmp(&other.id))
    }

    /// Case-insensitive substring match against title or performer
    pub fn matches(&self, needle: &str) -> bool {
        contains_ignore_case(&self.title, needle) || contains_ignore_case(&self.performer, needle)
    }
}

/// Case-insensitive substring test shared by every store backend
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, peak: i64, debut: &str) -> SongRecord {
        SongRecord {
            id,
            title: format!("song {}", id),
            performer: "someone".to_string(),
            chart_debut: debut.to_string(),
            peak_position: peak,
            time_on_chart: 1,
        }
    }

    #[test]
    fn test_chart_order() {
        let mut songs = vec![record(1, 10, "2001"), record(2, 3, "1999"), record(3, 3, "2005")];
        songs.sort_by(SongRecord::chart_order);

        let order: Vec<(i64, &str)> = songs
            .iter()
            .map(|s| (s.peak_position, s.chart_debut.as_str()))
            .collect();
        assert_eq!(order, vec![(3, "2005"), (3, "1999"), (10, "2001")]);
    }

    #[test]
    fn test_debut_is_compared_as_text() {
        // "9/1/1999" sorts after "12/1/2005" as a string
        let mut songs = vec![record(1, 1, "12/1/2005"), record(2, 1, "9/1/1999")];
        songs.sort_by(SongRecord::chart_order);
        assert_eq!(songs[0].chart_debut, "9/1/1999");
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let mut song = record(1, 1, "2009");
        song.title = "Love Story".to_string();
        assert!(song.matches("love"));
        assert!(song.matches("LOVE"));
        assert!(song.matches("SOMEONE"));
        assert!(!song.matches("hate"));

        song.title = "Glove".to_string();
        assert!(song.matches("love"));
    }

    #[test]
    fn test_key_is_case_sensitive() {
        let a = RawRow::new("Song", "X", "2020", 1, 1);
        let b = RawRow::new("song", "X", "2020", 1, 1);
        assert_ne!(a.key(), b.key());
    }
}
