//! Web server module
//!
//! Serves the landing page, the search results page and a few
//! operational endpoints on top of the query engine.

mod handlers;
mod routes;
mod state;
mod templates;

pub use handlers::{SearchParams, SearchResponse};
pub use routes::create_router;
pub use state::AppState;
pub use templates::Templates;
