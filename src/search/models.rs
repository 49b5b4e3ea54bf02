//! Search query and outcome models

use crate::catalog::SongRecord;
use serde::Serialize;

/// A query that will actually be run against the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongQuery {
    /// Text matched as a case-insensitive substring, used verbatim
    pub text: String,
}

impl SongQuery {
    /// `None` when there is nothing to search for.
    ///
    /// Only an absent or empty string counts as "no search"; whitespace is
    /// a legitimate fragment and is searched as given.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some(text) if !text.is_empty() => Some(Self {
                text: text.to_string(),
            }),
            _ => None,
        }
    }
}

/// Result of a search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// No query text was given
    NotSearched,
    /// The query ran and matched nothing
    NoMatches { query: String },
    /// The query matched, songs are in chart order
    Matches {
        query: String,
        songs: Vec<SongRecord>,
    },
}

impl SearchOutcome {
    /// Build the outcome for a query that ran
    pub fn from_results(query: String, songs: Vec<SongRecord>) -> Self {
        if songs.is_empty() {
            Self::NoMatches { query }
        } else {
            Self::Matches { query, songs }
        }
    }

    /// Matched songs, empty unless a search found something
    pub fn songs(&self) -> &[SongRecord] {
        match self {
            Self::Matches { songs, .. } => songs,
            _ => &[],
        }
    }

    /// The query text, if a search ran
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::NotSearched => None,
            Self::NoMatches { query } | Self::Matches { query, .. } => Some(query),
        }
    }

    pub fn was_searched(&self) -> bool {
        !matches!(self, Self::NotSearched)
    }

    pub fn into_songs(self) -> Vec<SongRecord> {
        match self {
            Self::Matches { songs, .. } => songs,
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        assert_eq!(SongQuery::parse(None), None);
        assert_eq!(SongQuery::parse(Some("")), None);
        assert_eq!(SongQuery::parse(Some(" ")).unwrap().text, " ");
        assert_eq!(SongQuery::parse(Some("Love")).unwrap().text, "Love");
    }

    #[test]
    fn test_outcome_accessors() {
        let none = SearchOutcome::NotSearched;
        assert!(!none.was_searched());
        assert!(none.songs().is_empty());
        assert_eq!(none.query(), None);

        let empty = SearchOutcome::from_results("zzz".to_string(), vec![]);
        assert_eq!(
            empty,
            SearchOutcome::NoMatches {
                query: "zzz".to_string()
            }
        );
        assert!(empty.was_searched());
        assert_eq!(empty.query(), Some("zzz"));
    }

    #[test]
    fn test_outcome_serializes_with_status() {
        let json = serde_json::to_value(SearchOutcome::NotSearched).unwrap();
        assert_eq!(json["status"], "not_searched");
    }
}
