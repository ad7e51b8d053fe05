// src/test_support.rs
// =============================================================================
// In-memory stand-in for GitHub, shared by the unit tests.
//
// FakeGitHub serves gist listings and raw file bodies from HashMaps and
// remembers every raw URL it was asked for, so tests can assert on whether
// (and what) the matcher downloaded.
// =============================================================================

use indexmap::IndexMap;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use bytes::Bytes;
use futures::stream::{self, StreamExt};
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};
use crate::github::models::{GistFile, GistOwner};
use crate::github::{ContentStream, Gist, GistClient};

// Bodies are handed out in pieces this small to exercise the chunk window
const FAKE_CHUNK: usize = 7;

#[derive(Default)]
pub struct FakeGitHub {
    users: HashMap<String, Vec<Gist>>,
    listing_statuses: HashMap<String, u16>,
    bodies: HashMap<String, String>,
    fetched: Mutex<Vec<String>>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, username: &str, gists: Vec<Gist>) -> Self {
        self.users.insert(username.to_string(), gists);
        self
    }

    /// Makes the listing for `username` fail with the given HTTP status
    pub fn with_listing_status(mut self, username: &str, status: u16) -> Self {
        self.listing_statuses.insert(username.to_string(), status);
        self
    }

    pub fn with_body(mut self, raw_url: &str, body: &str) -> Self {
        self.bodies.insert(raw_url.to_string(), body.to_string());
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl GistClient for FakeGitHub {
    fn list_gists(&self, username: &str) -> impl Future<Output = ApiResult<Vec<Gist>>> + Send {
        let result = if let Some(status) = self.listing_statuses.get(username) {
            Err(ApiError::Upstream {
                message: format!("Failed to fetch gist for {}", username),
                status: *status,
            })
        } else {
            self.users
                .get(username)
                .cloned()
                .ok_or_else(ApiError::user_not_found)
        };

        async move { result }
    }

    fn fetch_file_content(
        &self,
        raw_url: &str,
        file_name: &str,
        gist_id: &str,
    ) -> impl Future<Output = ApiResult<ContentStream>> + Send {
        self.fetched.lock().unwrap().push(raw_url.to_string());

        let result = match self.bodies.get(raw_url) {
            Some(body) => {
                let chunks: Vec<ApiResult<Bytes>> = body
                    .as_bytes()
                    .chunks(FAKE_CHUNK)
                    .map(|c| Ok(Bytes::copy_from_slice(c)))
                    .collect();
                Ok(stream::iter(chunks).boxed())
            }
            None => Err(ApiError::FileFetch {
                message: format!(
                    "Failed to fetch content for file '{}' in Gist '{}':HTTP 404 Not Found",
                    file_name, gist_id
                ),
                status: 404,
            }),
        };

        async move { result }
    }
}

pub fn gist(id: &str, description: Option<&str>, files: Vec<(&str, GistFile)>) -> Gist {
    let mut extra = Map::new();
    extra.insert(
        "html_url".to_string(),
        Value::String(format!("https://gist.github.com/octocat/{}", id)),
    );

    Gist {
        id: id.to_string(),
        description: description.map(str::to_string),
        owner: Some(GistOwner {
            id: 583231,
            login: "octocat".to_string(),
            extra: Map::new(),
        }),
        files: files
            .into_iter()
            .map(|(name, file)| (name.to_string(), file))
            .collect::<IndexMap<_, _>>(),
        extra,
    }
}

pub fn inline(content: &str) -> GistFile {
    GistFile {
        content: Some(content.to_string()),
        ..GistFile::default()
    }
}

pub fn remote(raw_url: &str) -> GistFile {
    GistFile {
        raw_url: Some(raw_url.to_string()),
        ..GistFile::default()
    }
}

pub fn bare() -> GistFile {
    GistFile::default()
}
