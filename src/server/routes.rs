// src/server/routes.rs
// =============================================================================
// HTTP routes for the search service.
//
// Endpoints:
// - GET  /ping            -> static text, to check the server is up
// - POST /api/v1/search   -> search a user's gists
//       query:  ?page=<int>&page_size=<int>   (defaults 1 and 5)
//       body:   {"username": "...", "pattern": "..."}
//
// The router is built around any `GistClient`, so tests can pass a fake and
// production passes the reqwest-backed client.
// =============================================================================

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::github::GistClient;
use crate::search::{search_gists, SearchQuery, SearchResult};

pub const PING_RESPONSE: &str = "This is static response";

/// Builds the service router around a GitHub client
//
// Routes:
//   GET  /ping            -> the static health-check text
//   POST /api/v1/search   -> JSON body {username, pattern}, query ?page=&page_size=
//
// The client is shared by every request, so it goes behind an Arc.
pub fn router<C>(client: C) -> Router
where
    C: GistClient + 'static,
{
    Router::new()
        .route("/ping", get(ping))
        .route("/api/v1/search", post(search::<C>))
        .with_state(Arc::new(client))
}

async fn ping() -> &'static str {
    PING_RESPONSE
}

// Both fields are optional here so a missing field gets the same 400 as an
// empty one, instead of a deserialization error.
#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    pattern: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    page: Option<i64>,
    page_size: Option<i64>,
}

// Handles POST /api/v1/search
//
// Parameters:
//   client: shared GitHub client from the router state
//   pagination: the ?page=&page_size= query string, or the reason it failed to parse
//   body: the JSON body, or the reason it failed to parse
//
// Returns: 200 with the SearchResult, or an ApiError response. A body or
// query that doesn't parse is reported as a 400 like any other bad input.
async fn search<C: GistClient>(
    State(client): State<Arc<C>>,
    pagination: Result<Query<Pagination>, QueryRejection>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResult<Json<SearchResult>> {
    let Json(body) = body.map_err(|e| ApiError::invalid_input(e.body_text()))?;
    let Query(pagination) = pagination.map_err(|e| ApiError::invalid_input(e.body_text()))?;

    let query = SearchQuery::new(
        body.username,
        body.pattern,
        pagination.page,
        pagination.page_size,
    )?;

    let result = search_gists(client.as_ref(), &query).await?;
    Ok(Json(result))
}
