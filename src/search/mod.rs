//! Search module
//!
//! Turns a free-text fragment into an ordered, capped list of songs.

mod executor;
mod models;

pub use executor::SongSearch;
pub use models::*;
