//! Low-level helpers shared by the upstream clients.
//!
//! Both clients issue a single GET per call; nothing here retries.

use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client, Response};

use crate::error::{AppError, UpstreamError};

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// # Parameters
///
/// - `text`: The text to sanitize
/// - `max_len`: Maximum number of characters kept before truncation
///
/// # Returns
///
/// A sanitized string safe for logging
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    // Replace control characters and newlines to prevent log injection
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.chars().count() > max_len {
        let truncated: String = sanitized.chars().take(max_len).collect();
        format!(
            "{}... [truncated, {} total bytes]",
            truncated,
            text.len()
        )
    } else {
        sanitized
    }
}

/// Builds the reusable HTTP client for one upstream with its per-call timeout.
pub(crate) fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
}

/// Joins a base URL with percent-encoded path segments.
///
/// A trailing `/` on the base is ignored.
pub(crate) fn join_url(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        url.push_str(&urlencoding::encode(segment));
    }
    url
}

/// Sends a GET request, classifying transport failures as upstream errors.
pub(crate) async fn get(
    client: &Client,
    service: &'static str,
    url: &str,
) -> Result<Response, AppError> {
    debug!("Sending GET request to {}: {}", service, url);

    let response = client.get(url).send().await.map_err(|e| {
        warn!("Request to {} failed: {}", service, e);
        let message = if e.is_timeout() {
            "request timed out"
        } else {
            "request failed"
        };
        UpstreamError::with_cause(service, message, e)
    })?;

    debug!(
        "Received response with status: {} from {}",
        response.status(),
        service
    );
    Ok(response)
}

/// Reads the full response body.
pub(crate) async fn read_body(
    response: Response,
    service: &'static str,
) -> Result<Vec<u8>, AppError> {
    let bytes = response.bytes().await.map_err(|e| {
        warn!("Failed to read {} response body: {}", service, e);
        UpstreamError::with_cause(service, "failed to read response body", e)
    })?;
    debug!("{} bytes received from {}", bytes.len(), service);
    Ok(bytes.to_vec())
}
