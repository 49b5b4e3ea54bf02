//! HTTP request handlers

use super::state::AppState;
use crate::catalog::SongRecord;
use crate::search::SearchOutcome;
use crate::store::SongStore;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tera::Context;

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Title or performer fragment
    pub q: Option<String>,
    /// Output format, `json` or HTML by default
    pub format: Option<String>,
}

/// Search results response for JSON format
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// False when no query text was given
    pub searched: bool,
    pub query: Option<String>,
    pub number_of_results: usize,
    pub results: Vec<SongRecord>,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        let searched = outcome.was_searched();
        let query = outcome.query().map(str::to_string);
        let results = outcome.into_songs();
        Self {
            searched,
            query,
            number_of_results: results.len(),
            results,
        }
    }
}

fn render(state: &AppState, template: &str, ctx: &Context) -> Response {
    match state.templates.render_with_context(template, ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Home page handler
pub async fn index(State(state): State<AppState>) -> Response {
    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());

    render(&state, "index.html", &ctx)
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let outcome = match state.search.search(params.q.as_deref()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Search failed").into_response();
        }
    };

    match params.format.as_deref() {
        Some("json") => Json(SearchResponse::from(outcome)).into_response(),
        _ => {
            let mut ctx = Context::new();
            ctx.insert("instance_name", state.instance_name());
            ctx.insert("searched", &outcome.was_searched());
            ctx.insert("query", outcome.query().unwrap_or_default());
            ctx.insert("result_count", &outcome.songs().len());
            ctx.insert("results", outcome.songs());

            render(&state, "search.html", &ctx)
        }
    }
}

/// Stats page handler
pub async fn stats(State(state): State<AppState>) -> Response {
    let store = state.store().clone();
    let counts = tokio::task::spawn_blocking(move || -> crate::Result<_> {
        Ok((store.count()?, store.last_load()?))
    })
    .await;

    let (song_count, last_load) = match counts {
        Ok(Ok(counts)) => counts,
        Ok(Err(e)) => {
            tracing::error!("Storage error: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Storage error").into_response();
        }
        Err(e) => {
            tracing::error!("Join error: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Storage error").into_response();
        }
    };

    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("version", crate::VERSION);
    ctx.insert("backend", state.store().name());
    ctx.insert("song_count", &song_count);
    ctx.insert("last_load", &last_load);
    ctx.insert("metrics", &state.search.metrics().snapshot());

    render(&state, "stats.html", &ctx)
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
