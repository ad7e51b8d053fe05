// src/search/matcher.rs
// =============================================================================
// This module decides whether a gist matches a regular expression.
//
// A gist matches when the pattern is found in:
// 1. its description, or
// 2. any file name, or
// 3. any file body (inline, or downloaded when the listing omitted it)
//
// Checks stop at the first hit, and file names are tested before bodies so a
// matching name never costs a download.
//
// Downloaded bodies are matched chunk by chunk with a two-chunk sliding
// window (see ChunkWindow below).
// =============================================================================

use futures::StreamExt;
use regex::bytes::Regex as BytesRegex;
use regex::Regex;

use crate::error::{ApiError, ApiResult};
use crate::github::{ContentStream, Gist, GistClient};

/// Smallest chunk the streamed matcher will cut a file into (bytes)
pub const MIN_CHUNK_SIZE: usize = 1024;

/// A compiled search pattern.
///
/// Matching is case-sensitive and uses full regex semantics: `^` and `$`
/// anchor to the start and end of the text being searched, not to lines.
#[derive(Debug, Clone)]
pub struct Matcher {
    text: Regex,
    // Same pattern, for downloaded bodies that may be cut mid-character
    bytes: BytesRegex,
    chunk_size: usize,
}

impl Matcher {
    pub fn new(pattern: &str) -> ApiResult<Self> {
        let invalid = |e: regex::Error| ApiError::invalid_input(format!("Invalid 'pattern': {}", e));

        Ok(Self {
            text: Regex::new(pattern).map_err(invalid)?,
            bytes: BytesRegex::new(pattern).map_err(invalid)?,
            chunk_size: pattern.len().max(MIN_CHUNK_SIZE),
        })
    }

    pub fn pattern(&self) -> &str {
        self.text.as_str()
    }

    pub fn matches_description(&self, description: &str) -> bool {
        self.text.is_match(description)
    }

    /// Checks the description first, then the files.
    pub async fn matches_gist<C: GistClient>(&self, client: &C, gist: &Gist) -> ApiResult<bool> {
        if self.matches_description(gist.description_text()) {
            return Ok(true);
        }
        self.matches_files(client, gist).await
    }

    /// Walks the gist's files in order and returns on the first match.
    ///
    /// A file whose listing entry has neither inline content nor a raw URL
    /// can only match by name.
    pub async fn matches_files<C: GistClient>(&self, client: &C, gist: &Gist) -> ApiResult<bool> {
        for (file_name, file) in &gist.files {
            if self.text.is_match(file_name) {
                return Ok(true);
            }

            let found = match (&file.content, &file.raw_url) {
                (Some(content), _) => self.text.is_match(content),
                (None, Some(raw_url)) => {
                    let stream = client
                        .fetch_file_content(raw_url, file_name, &gist.id)
                        .await?;
                    self.matches_stream(stream).await?
                }
                (None, None) => false,
            };

            if found {
                return Ok(true);
            }
        }

        Ok(false)
    }

    // Feeds a downloaded body through the sliding window.
    // Returning early drops the stream, which stops the download.
    async fn matches_stream(&self, mut stream: ContentStream) -> ApiResult<bool> {
        let mut window = self.window();

        while let Some(chunk) = stream.next().await {
            if window.push(&chunk?) {
                return Ok(true);
            }
        }

        Ok(window.finish())
    }

    pub fn window(&self) -> ChunkWindow<'_> {
        ChunkWindow {
            regex: &self.bytes,
            chunk_size: self.chunk_size,
            previous: Vec::new(),
            pending: Vec::new(),
        }
    }
}

/// Matches a body that arrives in pieces.
///
/// Incoming bytes are re-cut into fixed chunks of `max(pattern length, 1024)`
/// bytes, and each chunk is searched together with the chunk before it. Any
/// match no longer than one chunk is therefore found even when it straddles a
/// boundary. A match longer than a chunk that stretches across more than two
/// chunks can be missed; that is an accepted approximation.
pub struct ChunkWindow<'a> {
    regex: &'a BytesRegex,
    chunk_size: usize,
    previous: Vec<u8>,
    pending: Vec<u8>,
}

impl ChunkWindow<'_> {
    /// Adds network bytes. Returns true as soon as a full chunk matches.
    pub fn push(&mut self, data: &[u8]) -> bool {
        self.pending.extend_from_slice(data);

        while self.pending.len() >= self.chunk_size {
            let chunk: Vec<u8> = self.pending.drain(..self.chunk_size).collect();
            if self.test(chunk) {
                return true;
            }
        }

        false
    }

    /// Tests whatever partial chunk is left once the body has ended.
    pub fn finish(&mut self) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        let last = std::mem::take(&mut self.pending);
        self.test(last)
    }

    fn test(&mut self, chunk: Vec<u8>) -> bool {
        let mut window = std::mem::take(&mut self.previous);
        window.extend_from_slice(&chunk);

        let found = self.regex.is_match(&window);
        self.previous = chunk;
        found
    }
}
