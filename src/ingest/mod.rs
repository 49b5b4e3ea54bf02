//! Chart ingestion
//!
//! Reads the raw chart export, merges rows that share a (title, performer)
//! pair and commits the merged set to a store in one batch.

mod aggregate;
mod loader;
mod reader;

pub use aggregate::Aggregator;
pub use loader::{LoadReport, Loader};
pub use reader::{read_rows, read_rows_from_path};
