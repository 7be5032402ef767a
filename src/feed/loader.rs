use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, USER_AGENT};
use thiserror::Error;
use tracing::{debug, info};

use super::models::{FeedDocument, Post};

/// Feed could not be loaded. Terminal for the page; never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("feed request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("HTTP {status}")]
    Status { status: reqwest::StatusCode },
    #[error("feed is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("feed is invalid or empty")]
    Empty,
}

/// Loads the post feed over HTTP.
#[derive(Debug, Clone)]
pub struct FeedLoader {
    client: reqwest::Client,
}

impl FeedLoader {
    /// Create a loader whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    /// Create a loader around an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch and parse the feed at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, malformed
    /// JSON, or a feed without posts.
    pub async fn load(&self, url: &str) -> Result<Vec<Post>, FetchError> {
        debug!(url = %url, "Fetching post feed");

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .header(USER_AGENT, concat!("video-post-player/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .map_err(FetchError::Request)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::Request)?;
        let posts = parse_feed(&body)?;

        info!(url = %url, posts = posts.len(), "Post feed loaded");
        Ok(posts)
    }
}

/// Parse a feed body (bare array or `{ "posts": [...] }` envelope).
///
/// # Errors
///
/// Returns an error for malformed JSON or a feed with no posts.
pub fn parse_feed(body: &[u8]) -> Result<Vec<Post>, FetchError> {
    let document: FeedDocument = serde_json::from_slice(body).map_err(FetchError::Parse)?;
    let posts = document.into_posts();
    if posts.is_empty() {
        return Err(FetchError::Empty);
    }
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let posts = parse_feed(br#"[{"id":"a","links":{"videy":["https://x/a.mp4"]}}]"#).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].streams(), ["https://x/a.mp4"]);
    }

    #[test]
    fn test_parse_rejects_empty_feed() {
        assert!(matches!(parse_feed(b"[]"), Err(FetchError::Empty)));
        assert!(matches!(
            parse_feed(br#"{"posts": []}"#),
            Err(FetchError::Empty)
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_feed(b"<html>"), Err(FetchError::Parse(_))));
        assert!(matches!(
            parse_feed(br#"{"items": []}"#),
            Err(FetchError::Parse(_))
        ));
    }
}
