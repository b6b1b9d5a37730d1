//! Record types returned by the FxTwitter metadata API.
//!
//! Every response is an envelope with an embedded `code` and `message`; the
//! record itself is optional even when `code` is 200. Missing or `null`
//! fields fall back to their defaults so that partial upstream records still
//! deserialize.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Timestamp as emitted by Twitter (`Mon Jan 02 15:04:05 -0700 2006`) or RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwitterTime(pub DateTime<FixedOffset>);

impl TwitterTime {
    const TWITTER_FORMAT: &'static str = "%a %b %d %H:%M:%S %z %Y";

    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_str(s, Self::TWITTER_FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(s))
            .map(TwitterTime)
    }
}

impl fmt::Display for TwitterTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl Serialize for TwitterTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TwitterTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TwitterTime::parse(&s).map_err(de::Error::custom)
    }
}

/// Reads an explicit `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Envelope returned by `GET /<username>/status/<id>`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TweetResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweet: Option<Tweet>,
}

/// Envelope returned by `GET /<username>`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tweet {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: Author,
    #[serde(deserialize_with = "null_as_default")]
    pub replies: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub retweets: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub likes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<i64>,
    pub created_at: Option<TwitterTime>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_timestamp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub possibly_scam: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub possibly_sensitive: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub lang: String,
    #[serde(deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replying_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replying_to_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Box<Tweet>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<Translation>,
}

/// Tweet author as embedded in a tweet record.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub screen_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub avatar_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweets: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub verified: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub blue_badge: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub all: Vec<MediaItem>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub photos: Vec<Photo>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub videos: Vec<Video>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mosaic: Option<Mosaic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalMedia>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaItem {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub height: u32,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub format: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub thumbnail_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Photo {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub height: u32,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub format: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub height: u32,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(
        rename = "type",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub kind: String,
}

/// Combined preview image for multi-photo tweets, keyed by image format.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Mosaic {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "null_as_default")]
    pub formats: BTreeMap<String, String>,
}

/// External embed such as a YouTube video.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalMedia {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub thumbnail_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Poll {
    #[serde(deserialize_with = "null_as_default")]
    pub total_votes: i64,
    pub ends_at: Option<TwitterTime>,
    #[serde(deserialize_with = "null_as_default")]
    pub time_remaining: String,
    #[serde(deserialize_with = "null_as_default")]
    pub choices: Vec<PollChoice>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PollChoice {
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(deserialize_with = "null_as_default")]
    pub count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub percentage: i64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Translation {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub source_lang: String,
    #[serde(deserialize_with = "null_as_default")]
    pub target_lang: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub translation_url: String,
}

/// User profile record.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub screen_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub followers: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub following: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub likes: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub media_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub tweets: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub banner_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub avatar_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub joined: String,
    #[serde(deserialize_with = "null_as_default")]
    pub protected: bool,
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Verification {
    #[serde(deserialize_with = "null_as_default")]
    pub verified: bool,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
}
