//! Error types for the catalog, loader and query engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("row {row}: field `{field}` is not an integer: {value:?}")]
    InvalidInteger {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("store already holds {count} songs")]
    StoreNotEmpty { count: usize },

    #[error("store lock poisoned")]
    LockPoisoned,

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;
