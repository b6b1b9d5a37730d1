//! Client for the FxTwitter metadata API.
//!
//! FxTwitter always answers with a JSON envelope carrying an embedded `code`,
//! independent of the HTTP status. The embedded code decides the outcome.

use std::time::Duration;

use log::{debug, info, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{AppError, UpstreamError};

use super::api::{build_http_client, get, join_url, read_body, sanitize_for_logging};
use super::models::{TweetResponse, UserResponse};

const SERVICE: &str = "fxtwitter";

/// Public FxTwitter API endpoint.
pub const FXTWITTER_API_BASE_URL: &str = "https://api.fxtwitter.com";

/// Per-call budget for a metadata fetch.
pub const FXTWITTER_TIMEOUT: Duration = Duration::from_secs(15);

/// A response envelope with an embedded status code.
pub trait Envelope: DeserializeOwned {
    fn code(&self) -> i64;
    fn message(&self) -> &str;
}

impl Envelope for TweetResponse {
    fn code(&self) -> i64 {
        self.code
    }

    fn message(&self) -> &str {
        &self.message
    }
}

impl Envelope for UserResponse {
    fn code(&self) -> i64 {
        self.code
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Fetches tweet and user records from FxTwitter.
#[derive(Debug, Clone)]
pub struct FxTwitterClient {
    base_url: String,
    http: Client,
}

impl FxTwitterClient {
    /// Creates a client for the FxTwitter API at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(
            base_url,
            build_http_client(FXTWITTER_TIMEOUT)?,
        ))
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

    /// Fetches a single tweet.
    ///
    /// The returned envelope may carry no tweet even though the embedded code
    /// was 200; that is passed through as-is.
    pub async fn fetch_tweet(
        &self,
        username: &str,
        tweet_id: &str,
    ) -> Result<TweetResponse, AppError> {
        if username.is_empty() {
            return Err(AppError::validation("username", "username cannot be empty"));
        }
        if tweet_id.is_empty() {
            return Err(AppError::validation("tweet_id", "tweet ID cannot be empty"));
        }

        info!("Fetching tweet {} for user: {}", tweet_id, username);
        let url = join_url(&self.base_url, &[username, "status", tweet_id]);
        self.fetch_envelope(&url, "tweet", tweet_id).await
    }

    /// Fetches a user profile.
    pub async fn fetch_user(&self, username: &str) -> Result<UserResponse, AppError> {
        if username.is_empty() {
            return Err(AppError::validation("username", "username cannot be empty"));
        }

        info!("Fetching profile for user: {}", username);
        let url = join_url(&self.base_url, &[username]);
        self.fetch_envelope(&url, "user", username).await
    }

    /// Issues the GET and classifies the envelope by its embedded code.
    async fn fetch_envelope<T: Envelope>(
        &self,
        url: &str,
        resource: &'static str,
        id: &str,
    ) -> Result<T, AppError> {
        let response = get(&self.http, SERVICE, url).await?;
        let status = response.status();
        let body = read_body(response, SERVICE).await?;

        let envelope: T = serde_json::from_slice(&body).map_err(|e| {
            warn!(
                "Failed to parse FxTwitter response for {} {} (status {}): {}",
                resource, id, status, e
            );
            debug!(
                "Response body: {}",
                sanitize_for_logging(&String::from_utf8_lossy(&body), 200)
            );
            UpstreamError::with_cause(SERVICE, "failed to parse JSON response", e)
        })?;

        match envelope.code() {
            200 => {
                debug!("FxTwitter returned {} {}", resource, id);
                Ok(envelope)
            }
            404 => {
                info!("FxTwitter reports {} {} not found", resource, id);
                Err(AppError::not_found(resource, id))
            }
            code => {
                warn!(
                    "FxTwitter error for {} {}: {} (code: {})",
                    resource,
                    id,
                    envelope.message(),
                    code
                );
                Err(UpstreamError {
                    service: SERVICE,
                    status: u16::try_from(code).ok(),
                    message: envelope.message().to_string(),
                    cause: None,
                }
                .into())
            }
        }
    }
}
