//! Upstream integrations.
//!
//! This module contains the clients for the two Twitter-data mirrors the
//! gateway re-exposes: a Nitter instance (RSS feeds) and the FxTwitter JSON API.

mod api;
mod fxtwitter;
mod models;
mod nitter;
mod parsing;

// Re-export public API
pub use fxtwitter::{FxTwitterClient, FXTWITTER_API_BASE_URL, FXTWITTER_TIMEOUT};
pub use models::{
    Author, ExternalMedia, Media, MediaItem, Mosaic, Photo, Poll, PollChoice, Translation, Tweet,
    TweetResponse, TwitterTime, User, UserResponse, Verification, Video,
};
pub use nitter::{NitterClient, NITTER_TIMEOUT};
pub use parsing::{extract_tweet_ids, parse_feed, Channel, FeedDocument, FeedEntry, FeedError};
