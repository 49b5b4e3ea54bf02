//! Catalog data model
//!
//! Raw chart rows as read from disk, the dedup identity of a song and the
//! persisted song records served by the query engine.

mod types;

pub use types::*;
