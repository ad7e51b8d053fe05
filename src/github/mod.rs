// src/github/mod.rs
// =============================================================================
// This module handles everything that comes from GitHub.
//
// Currently implements:
// - Listing a user's public gists through the REST API
// - Streaming raw gist file bodies that the listing doesn't inline
// - The gist data types, kept faithful to the API's JSON
// =============================================================================

mod client;
pub mod models;

pub use client::{
    ClientConfig, ContentStream, GistClient, HttpGistClient, DEFAULT_API_BASE,
};
pub use models::Gist;
