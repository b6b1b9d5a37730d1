//! HTTP route handlers for the gateway.
//!
//! Handlers only translate path parameters into client calls and serialize
//! the result. Errors are turned into responses by [`AppError`]'s
//! `IntoResponse` implementation.

use axum::{
    extract::{Path, State},
    response::Json,
};
use log::{debug, error};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::twitter::{FxTwitterClient, NitterClient, TweetResponse, UserResponse};

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub nitter: NitterClient,
    pub fxtwitter: FxTwitterClient,
}

/// Body of `GET /api/users/{username}/tweets`.
#[derive(Debug, Serialize)]
pub struct TweetsResponse {
    pub username: String,
    pub tweet_ids: Vec<String>,
}

/// Handles GET requests to the `/health` endpoint.
///
/// # Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "twitterx-gateway"
/// }
/// ```
pub async fn handle_health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": env!("CARGO_PKG_NAME")}))
}

/// Handles `GET /api/users/{username}/tweets`.
///
/// Returns the tweet ids found in the user's Nitter feed.
pub async fn handle_user_tweets(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<TweetsResponse>, AppError> {
    debug!("Fetching tweets for user: {}", username);

    let tweet_ids = state
        .nitter
        .fetch_tweet_ids(&username)
        .await
        .inspect_err(|e| error!("Error fetching tweets for user {}: {}", username, e))?;

    debug!("Found {} tweets for user: {}", tweet_ids.len(), username);
    Ok(Json(TweetsResponse {
        username,
        tweet_ids,
    }))
}

/// Handles `GET /api/users/{username}/tweets/{id}`.
///
/// Returns the FxTwitter tweet envelope unchanged.
pub async fn handle_tweet(
    State(state): State<AppState>,
    Path((username, tweet_id)): Path<(String, String)>,
) -> Result<Json<TweetResponse>, AppError> {
    debug!("Fetching tweet {} for user: {}", tweet_id, username);

    let tweet = state
        .fxtwitter
        .fetch_tweet(&username, &tweet_id)
        .await
        .inspect_err(|e| {
            error!(
                "Error fetching tweet {} for user {}: {}",
                tweet_id, username, e
            )
        })?;

    debug!("Successfully fetched tweet {}", tweet_id);
    Ok(Json(tweet))
}

/// Handles `GET /api/users/{username}`.
///
/// Returns the FxTwitter user envelope unchanged.
pub async fn handle_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    debug!("Fetching user data for: {}", username);

    let user = state
        .fxtwitter
        .fetch_user(&username)
        .await
        .inspect_err(|e| error!("Error fetching user {}: {}", username, e))?;

    debug!("Successfully fetched user data for: {}", username);
    Ok(Json(user))
}
