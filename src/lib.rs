//! Chart Search: look up chart songs by title or performer
//!
//! Raw chart rows are merged into one record per (title, performer) pair
//! by the [`ingest`] loader, persisted in a [`store`], and served by the
//! [`search`] engine behind a small [`web`] front end.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod search;
pub mod store;
pub mod web;

pub use catalog::{RawRow, SongRecord};
pub use config::Settings;
pub use error::{Error, Result};
pub use ingest::{LoadReport, Loader};
pub use search::{SearchOutcome, SongSearch};
pub use store::{LoadMode, SongStore};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
