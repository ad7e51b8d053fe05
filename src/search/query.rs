// src/search/query.rs
// =============================================================================
// The search pipeline: validate -> list gists -> match -> paginate.
//
// Both the HTTP handler and the `search` subcommand go through here, so the
// validation messages and the result shape are the same everywhere.
// =============================================================================

use serde::Serialize;
use tracing::{debug, info};

use super::matcher::Matcher;
use super::paginate::PageRequest;
use crate::error::{ApiError, ApiResult};
use crate::github::{Gist, GistClient};

const MISSING_FIELDS_MESSAGE: &str = "Both 'username' and 'pattern' parameters are required.";

/// A fully validated search request
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub username: String,
    pub matcher: Matcher,
    pub page: PageRequest,
}

impl SearchQuery {
    // Validates a raw request into a query the pipeline can run
    //
    // Parameters:
    //   username, pattern: required, and must not be empty
    //   page, page_size: optional, defaults are page 1 with 5 per page
    //
    // Returns: the query, or InvalidInput for the first check that failed.
    // Checks run in a fixed order: fields, page, page size, then the regex.
    //
    // Example:
    //   new(Some("octocat"), Some(""), None, None)
    //     -> Err("Both 'username' and 'pattern' parameters are required.")
    pub fn new(
        username: Option<String>,
        pattern: Option<String>,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> ApiResult<Self> {
        let (username, pattern) = match (username, pattern) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
            _ => return Err(ApiError::invalid_input(MISSING_FIELDS_MESSAGE)),
        };

        let page = PageRequest::new(page, page_size)?;
        let matcher = Matcher::new(&pattern)?;

        Ok(Self {
            username,
            matcher,
            page,
        })
    }
}

/// The JSON body of a successful search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub status: &'static str,
    pub username: String,
    pub pattern: String,
    pub matches: Vec<Gist>,
    pub page: usize,
    pub page_size: usize,
    /// Number of gists on this page
    pub count: usize,
    /// Number of matching gists across all pages
    pub total_count: usize,
}

/// Runs one search. The first upstream failure aborts the whole search.
//
// Parameters:
//   client: where gists and raw file bodies come from (borrowed)
//   query: an already validated request
//
// Returns: SearchResult with the requested page of matches, in listing
// order, and the total number of matches across all pages
pub async fn search_gists<C: GistClient>(client: &C, query: &SearchQuery) -> ApiResult<SearchResult> {
    info!(
        username = %query.username,
        pattern = query.matcher.pattern(),
        page = query.page.page(),
        page_size = query.page.page_size(),
        "searching gists"
    );

    let gists = client.list_gists(&query.username).await?;
    let scanned = gists.len();

    let mut matching = Vec::new();
    for gist in gists {
        if query.matcher.matches_gist(client, &gist).await? {
            debug!(gist_id = %gist.id, "gist matched");
            matching.push(gist);
        }
    }

    let total_count = matching.len();
    let (start, end) = query.page.bounds(total_count);
    let matches: Vec<Gist> = matching.drain(start..end).collect();

    info!(scanned, total_count, returned = matches.len(), "search finished");

    Ok(SearchResult {
        status: "success",
        username: query.username.clone(),
        pattern: query.matcher.pattern().to_string(),
        count: matches.len(),
        matches,
        page: query.page.page(),
        page_size: query.page.page_size(),
        total_count,
    })
}
