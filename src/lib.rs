//! # TwitterX Gateway Library
//!
//! A Rust web service library that re-exposes two third-party Twitter-data
//! sources as a small uniform REST API:
//!
//! - a self-hosted Nitter instance, whose per-user RSS feed yields tweet ids;
//! - the FxTwitter JSON API, which yields tweet and user metadata.
//!
//! Upstream failures are normalized into [`AppError`], which maps each kind
//! of failure onto a stable HTTP status.
//!
//! ## Configuration
//!
//! - `NITTER_URL`: Base URL of the Nitter instance (required)
//! - `FXTWITTER_URL`: Base URL of the FxTwitter API (defaults to `https://api.fxtwitter.com`)
//! - `PORT`: Server port (defaults to 8080)
//! - `PUBLIC_DIR`: Directory holding the UI pages (defaults to `public`)
//! - `DEBUG`: Enables debug logging when `RUST_LOG` is not set
//!
//! ## API Endpoints
//!
//! - `GET /api/users/{username}/tweets`: Tweet ids from the user's feed
//! - `GET /api/users/{username}/tweets/{id}`: Tweet metadata
//! - `GET /api/users/{username}`: User profile
//! - `GET /health`: Returns service health status

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::services::{ServeDir, ServeFile};

pub mod config;
pub mod error;
pub mod handlers;
pub mod twitter;

// Re-export commonly used types and functions
pub use config::{Config, ConfigError};
pub use error::{AppError, UpstreamError};
pub use handlers::{handle_health, handle_tweet, handle_user, handle_user_tweets, AppState};
pub use twitter::{extract_tweet_ids, parse_feed, FxTwitterClient, NitterClient};

impl AppState {
    /// Builds the upstream clients described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            nitter: NitterClient::new(config.nitter_url.clone())?,
            fxtwitter: FxTwitterClient::new(config.fxtwitter_url.clone())?,
        })
    }
}

/// Builds the API router.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/users/:username/tweets/:id", get(handle_tweet))
        .route("/api/users/:username/tweets", get(handle_user_tweets))
        .route("/api/users/:username", get(handle_user))
        .route("/health", get(handle_health))
        .with_state(state)
}

/// Builds the full application: API routes plus the UI pages served from
/// `public_dir`.
pub fn create_app(state: AppState, public_dir: &Path) -> Router {
    api_router(state)
        .nest_service("/static", ServeDir::new(public_dir.join("static")))
        .route_service("/", ServeFile::new(public_dir.join("index.html")))
        .route_service("/:username", ServeFile::new(public_dir.join("profile.html")))
}

#[cfg(test)]
mod tests;
