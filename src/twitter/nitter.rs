//! Client for a self-hosted Nitter instance.
//!
//! Nitter exposes a per-user RSS feed at `<base>/<username>/rss`; the tweet
//! ids are recovered from the `<guid>` of each feed item.

use std::time::Duration;

use log::{debug, info, warn};
use reqwest::{Client, StatusCode};

use crate::error::{AppError, UpstreamError};

use super::api::{build_http_client, get, join_url, read_body, sanitize_for_logging};
use super::parsing::{extract_tweet_ids, parse_feed};

const SERVICE: &str = "nitter";

/// Per-call budget for a feed fetch.
pub const NITTER_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches tweet ids from a Nitter RSS feed.
#[derive(Debug, Clone)]
pub struct NitterClient {
    base_url: String,
    http: Client,
}

impl NitterClient {
    /// Creates a client for the Nitter instance at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(base_url, build_http_client(NITTER_TIMEOUT)?))
    }

    /// Creates a client that reuses an existing HTTP client.
    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the ids of the tweets currently in `username`'s feed, newest first
    /// as ordered by the feed.
    ///
    /// # Errors
    ///
    /// - `Validation` if `username` is empty
    /// - `NotFound` if Nitter answers 404
    /// - `Upstream` on transport failure, any other non-200 status, or an
    ///   unparseable feed
    pub async fn fetch_tweet_ids(&self, username: &str) -> Result<Vec<String>, AppError> {
        if username.is_empty() {
            return Err(AppError::validation("username", "username cannot be empty"));
        }

        let url = join_url(&self.base_url, &[username, "rss"]);
        info!("Fetching RSS feed for user: {}", username);

        let response = get(&self.http, SERVICE, &url).await?;
        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                info!("Nitter has no feed for user: {}", username);
                return Err(AppError::not_found("user", username));
            }
            status => {
                warn!("Unexpected status {} from Nitter for {}", status, username);
                return Err(
                    UpstreamError::with_status(SERVICE, status.as_u16(), "unexpected status code")
                        .into(),
                );
            }
        }

        let body = read_body(response, SERVICE).await?;
        let feed = parse_feed(&body).map_err(|e| {
            warn!("Failed to parse RSS feed for {}: {}", username, e);
            debug!(
                "Feed body: {}",
                sanitize_for_logging(&String::from_utf8_lossy(&body), 200)
            );
            UpstreamError::with_cause(SERVICE, "failed to parse RSS feed", e)
        })?;

        let ids = extract_tweet_ids(&feed);
        debug!(
            "Extracted {} tweet ids from {} feed entries for {}",
            ids.len(),
            feed.channel.items.len(),
            username
        );
        Ok(ids)
    }
}
