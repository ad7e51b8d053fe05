// src/github/client.rs
// =============================================================================
// This module talks to the GitHub gist API.
//
// Two calls are needed:
// - List a user's public gists:  GET {api_base}/users/{username}/gists
// - Download a raw file body:    GET {raw_url}
//
// The search handler depends on the `GistClient` trait rather than on
// reqwest directly, so tests can hand it an in-memory fake.
//
// Rust concepts:
// - Traits with `impl Future` return types: async methods usable from
//   generic handlers (the `+ Send` bound is what axum needs)
// - Streams: raw files are read chunk by chunk instead of all at once
// =============================================================================

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use anyhow::anyhow;
use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use tokio::time::timeout;
use tracing::debug;
use url::Url;

use super::models::Gist;
use crate::error::{ApiError, ApiResult};

/// A raw file body, delivered as it arrives from the network.
pub type ContentStream = BoxStream<'static, ApiResult<Bytes>>;

/// Everything the search pipeline needs from GitHub.
pub trait GistClient: Send + Sync {
    /// Lists the public gists for `username`, in the order GitHub returns them.
    fn list_gists(&self, username: &str) -> impl Future<Output = ApiResult<Vec<Gist>>> + Send;

    /// Opens the body of one gist file for streaming.
    ///
    /// `file_name` and `gist_id` are only used to build error messages.
    fn fetch_file_content(
        &self,
        raw_url: &str,
        file_name: &str,
        gist_id: &str,
    ) -> impl Future<Output = ApiResult<ContentStream>> + Send;
}

/// Settings for the real HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: Url,
    pub timeout: Duration,
    pub user_agent: String,
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            timeout: Duration::from_secs(10),
            user_agent: format!("gist-search/{}", env!("CARGO_PKG_VERSION")),
            token: None,
        }
    }
}

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// `GistClient` backed by reqwest.
///
/// Cloning is cheap: reqwest's Client is a reference-counted connection pool.
#[derive(Debug, Clone)]
pub struct HttpGistClient {
    client: Client,
    api_base: Url,
    token: Option<String>,
    // Limit for connecting and for each individual read, not for a whole body
    timeout: Duration,
}

impl HttpGistClient {
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        // GitHub rejects API requests that have no User-Agent header.
        //
        // No overall request timeout: a large raw file may take longer than
        // `timeout` to stream, as long as every read makes progress in time.
        let client = Client::builder()
            .connect_timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base,
            token: config.token,
            timeout: config.timeout,
        })
    }

    // Builds {api_base}/users/{username}/gists
    //
    // The username is pushed as a path segment so characters like '/' or '?'
    // are percent-encoded instead of changing the URL's meaning.
    fn gists_url(&self, username: &str) -> ApiResult<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API base URL cannot have a path: {}", self.api_base))?
            .pop_if_empty()
            .extend(["users", username, "gists"]);
        Ok(url)
    }
}

impl GistClient for HttpGistClient {
    fn list_gists(&self, username: &str) -> impl Future<Output = ApiResult<Vec<Gist>>> + Send {
        async move {
            let url = self.gists_url(username)?;
            debug!(%url, "listing gists");

            let mut request = self
                .client
                .get(url)
                .header(ACCEPT, "application/vnd.github+json");
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = timeout(self.timeout, request.send())
                .await
                .map_err(|e| listing_transport_error(username, e))?
                .map_err(|e| listing_transport_error(username, e))?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Err(ApiError::user_not_found());
            }
            if !status.is_success() {
                return Err(ApiError::Upstream {
                    message: format!("Failed to fetch gist for {}", username),
                    status: status.as_u16(),
                });
            }

            let gists: Vec<Gist> = timeout(self.timeout, response.json())
                .await
                .map_err(|e| listing_transport_error(username, e))?
                .map_err(|e| listing_transport_error(username, e))?;

            debug!(count = gists.len(), "received gists for {}", username);
            Ok(gists)
        }
    }

    fn fetch_file_content(
        &self,
        raw_url: &str,
        file_name: &str,
        gist_id: &str,
    ) -> impl Future<Output = ApiResult<ContentStream>> + Send {
        async move {
            debug!(raw_url, file_name, gist_id, "fetching gist file");

            let response = timeout(self.timeout, self.client.get(raw_url).send())
                .await
                .map_err(|e| file_fetch_error(file_name, gist_id, e, 500))?
                .map_err(|e| file_fetch_error(file_name, gist_id, e, 500))?;

            let status = response.status();
            if !status.is_success() {
                return Err(file_fetch_error(
                    file_name,
                    gist_id,
                    format!("HTTP {}", status),
                    status.as_u16(),
                ));
            }

            let body = BodyReader {
                chunks: response.bytes_stream().boxed(),
                read_timeout: self.timeout,
                file_name: file_name.to_string(),
                gist_id: gist_id.to_string(),
            };

            Ok(body.into_stream())
        }
    }
}

// State for streaming one raw file body.
//
// Each read gets its own `read_timeout`; the body as a whole has no limit.
// The stream outlives the fetch call, so it owns copies of the names it
// needs for error messages.
struct BodyReader {
    chunks: BoxStream<'static, reqwest::Result<Bytes>>,
    read_timeout: Duration,
    file_name: String,
    gist_id: String,
}

impl BodyReader {
    fn into_stream(self) -> ContentStream {
        futures::stream::unfold(Some(self), |state| async move {
            let mut reader = state?;

            let error = match timeout(reader.read_timeout, reader.chunks.next()).await {
                Ok(None) => return None,
                Ok(Some(Ok(chunk))) => return Some((Ok(chunk), Some(reader))),
                Ok(Some(Err(e))) => file_fetch_error(&reader.file_name, &reader.gist_id, e, 500),
                Err(elapsed) => {
                    file_fetch_error(&reader.file_name, &reader.gist_id, elapsed, 500)
                }
            };

            // A failed read ends the stream
            Some((Err(error), None))
        })
        .boxed()
    }
}

fn listing_transport_error(username: &str, error: impl Display) -> ApiError {
    ApiError::Upstream {
        message: format!(
            "Failed to fetch gist for {}. Got exception {}",
            username, error
        ),
        status: 500,
    }
}

fn file_fetch_error(file_name: &str, gist_id: &str, detail: impl Display, status: u16) -> ApiError {
    ApiError::FileFetch {
        message: format!(
            "Failed to fetch content for file '{}' in Gist '{}':{}",
            file_name, gist_id, detail
        ),
        status,
    }
}
