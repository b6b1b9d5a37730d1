//! RSS feed parsing and tweet identifier extraction.
//!
//! Nitter instances differ in how they fill the `<guid>` of a feed item: some
//! emit the bare tweet id, others a permalink such as
//! `https://nitter.net/user/status/1982148508187500913#m`. Both are accepted.

use std::sync::OnceLock;

use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read markup: {0}")]
    Markup(#[from] quick_xml::Error),
    #[error("expected <rss> root element, found <{0}>")]
    NotRss(String),
    #[error("document has no root element")]
    NoRoot,
    #[error("failed to parse RSS: {0}")]
    Parse(#[from] quick_xml::de::DeError),
}

/// A parsed RSS document.
#[derive(Debug, Default, Deserialize)]
pub struct FeedDocument {
    #[serde(default)]
    pub channel: Channel,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Channel {
    pub title: String,
    pub link: String,
    pub description: String,
    #[serde(rename = "item")]
    pub items: Vec<FeedEntry>,
}

/// A single feed item, one per tweet.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeedEntry {
    pub title: String,
    pub description: String,
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    pub guid: String,
    pub link: String,
    #[serde(rename = "dc:creator", alias = "creator")]
    pub creator: String,
}

/// Parses raw RSS bytes into a [`FeedDocument`].
///
/// Fails when the bytes are not well-formed markup or the root element is not
/// `<rss>`, so that an HTML error page served with 200 is never read as an
/// empty feed.
pub fn parse_feed(bytes: &[u8]) -> Result<FeedDocument, FeedError> {
    check_root(bytes)?;
    Ok(quick_xml::de::from_reader(bytes)?)
}

fn check_root(bytes: &[u8]) -> Result<(), FeedError> {
    let mut reader = Reader::from_reader(bytes);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                return match e.local_name().as_ref() {
                    b"rss" => Ok(()),
                    other => Err(FeedError::NotRss(
                        String::from_utf8_lossy(other).into_owned(),
                    )),
                };
            }
            Event::Eof => return Err(FeedError::NoRoot),
            _ => {}
        }
    }
}

fn status_pattern() -> Option<&'static Regex> {
    static STATUS_RE: OnceLock<Option<Regex>> = OnceLock::new();
    STATUS_RE
        .get_or_init(|| Regex::new(r"/status/([0-9]+)").ok())
        .as_ref()
}

fn plain_pattern() -> Option<&'static Regex> {
    static PLAIN_RE: OnceLock<Option<Regex>> = OnceLock::new();
    PLAIN_RE.get_or_init(|| Regex::new(r"^([0-9]+)$").ok()).as_ref()
}

/// Extracts the tweet id from a single guid, if it uses a known encoding.
///
/// The `/status/<digits>` form is tried before the bare-digit form.
fn tweet_id_from_guid(guid: &str) -> Option<&str> {
    status_pattern()?
        .captures(guid)
        .or_else(|| plain_pattern()?.captures(guid))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Returns the tweet ids of all entries with a recognized guid, in feed order.
///
/// Entries whose guid matches neither encoding are skipped.
pub fn extract_tweet_ids(feed: &FeedDocument) -> Vec<String> {
    feed.channel
        .items
        .iter()
        .filter_map(|entry| tweet_id_from_guid(&entry.guid))
        .map(str::to_string)
        .collect()
}
