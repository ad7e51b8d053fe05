// src/search/mod.rs
// =============================================================================
// This module contains the gist search logic.
//
// Submodules:
// - matcher: Regex matching over descriptions, file names and file bodies
// - paginate: Validated 1-indexed page windows
// - query: Request validation and the end-to-end search pipeline
// =============================================================================

mod matcher;
mod paginate;
mod query;

pub use paginate::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use query::{search_gists, SearchQuery, SearchResult};
