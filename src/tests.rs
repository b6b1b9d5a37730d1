//! # Tests Module
//!
//! Router-level tests for the gateway. Upstream services are replaced by
//! `wiremock` servers so every error path can be driven end to end.
//!
//! ## Test Categories
//!
//! - Health endpoint
//! - Tweet id listing via the Nitter feed
//! - Tweet and user metadata via FxTwitter
//! - Error-to-status mapping at the HTTP boundary
//! - UI page serving

use std::path::PathBuf;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Json,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{
    create_app, handle_health, twitter::FxTwitterClient, twitter::NitterClient, AppState, Config,
};

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>jack / @jack</title>
    <item><title>a</title><guid>2006027578998472912</guid></item>
    <item><title>b</title><guid>https://nitter.net/jack/status/1982148508187500913#m</guid></item>
    <item><title>c</title><guid>not-a-tweet</guid></item>
  </channel>
</rss>"#;

fn public_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public")
}

/// Creates a test application whose upstreams both point at `upstream`.
fn create_test_app(upstream: &MockServer) -> Router {
    let state = AppState {
        nitter: NitterClient::new(upstream.uri()).unwrap(),
        fxtwitter: FxTwitterClient::new(upstream.uri()).unwrap(),
    };
    create_app(state, &public_dir())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String, Option<String>) {
    let request = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap(), content_type)
}

async fn mock_json(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_handle_health() {
    let Json(json_response) = handle_health().await;
    assert_eq!(json_response["status"], "healthy");
    assert_eq!(json_response["service"], "twitterx-gateway");
}

#[tokio::test]
async fn test_user_tweets_endpoint() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jack/rss"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
        .mount(&upstream)
        .await;

    let (status, body, _) = get(create_test_app(&upstream), "/api/users/jack/tweets").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["username"], "jack");
    assert_eq!(
        json["tweet_ids"],
        serde_json::json!(["2006027578998472912", "1982148508187500913"])
    );
}

#[tokio::test]
async fn test_user_tweets_not_found() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&upstream)
        .await;

    let (status, body, content_type) =
        get(create_test_app(&upstream), "/api/users/ghost/tweets").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "user 'ghost' not found");
    assert!(content_type.unwrap().starts_with("text/plain"));
}

#[tokio::test]
async fn test_user_tweets_upstream_failure() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&upstream)
        .await;

    let (status, body, _) = get(create_test_app(&upstream), "/api/users/jack/tweets").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, "nitter error: unexpected status code (status: 503)");
}

#[tokio::test]
async fn test_tweet_endpoint() {
    let upstream = MockServer::start().await;
    mock_json(
        &upstream,
        "/jack/status/20",
        r#"{"code":200,"message":"OK","tweet":{"id":"20","text":"just setting up my twttr","author":{"screen_name":"jack"}}}"#,
    )
    .await;

    let (status, body, _) = get(create_test_app(&upstream), "/api/users/jack/tweets/20").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["code"], 200);
    assert_eq!(json["tweet"]["id"], "20");
    assert_eq!(json["tweet"]["author"]["screen_name"], "jack");
}

#[tokio::test]
async fn test_tweet_embedded_not_found() {
    let upstream = MockServer::start().await;
    mock_json(
        &upstream,
        "/jack/status/1",
        r#"{"code":404,"message":"NOT_FOUND"}"#,
    )
    .await;

    let (status, body, _) = get(create_test_app(&upstream), "/api/users/jack/tweets/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "tweet '1' not found");
}

#[tokio::test]
async fn test_user_embedded_error_code() {
    let upstream = MockServer::start().await;
    mock_json(&upstream, "/jack", r#"{"code":500,"message":"API_FAIL"}"#).await;

    let (status, body, _) = get(create_test_app(&upstream), "/api/users/jack").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, "fxtwitter error: API_FAIL (status: 500)");
}

#[tokio::test]
async fn test_user_endpoint() {
    let upstream = MockServer::start().await;
    mock_json(
        &upstream,
        "/jack",
        r#"{"code":200,"message":"OK","user":{"screen_name":"jack","id":"12","followers":42}}"#,
    )
    .await;

    let (status, body, content_type) = get(create_test_app(&upstream), "/api/users/jack").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["user"]["id"], "12");
    assert_eq!(json["user"]["followers"], 42);
}

#[tokio::test]
async fn test_index_page_served() {
    let upstream = MockServer::start().await;
    let (status, body, _) = get(create_test_app(&upstream), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/static/app.js"));
}

#[tokio::test]
async fn test_profile_page_served_for_any_username() {
    let upstream = MockServer::start().await;
    let (status, body, _) = get(create_test_app(&upstream), "/jack").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/static/profile.js"));
}

#[tokio::test]
async fn test_static_asset_served() {
    let upstream = MockServer::start().await;
    let (status, _, content_type) = get(create_test_app(&upstream), "/static/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().contains("javascript"));
}

#[tokio::test]
async fn test_tweet_with_null_fields_is_served() {
    let upstream = MockServer::start().await;
    mock_json(
        &upstream,
        "/jack/status/21",
        r#"{"code":200,"message":"OK","tweet":{"id":"21","lang":null,"source":null}}"#,
    )
    .await;

    let (status, body, _) = get(create_test_app(&upstream), "/api/users/jack/tweets/21").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["tweet"]["id"], "21");
    assert_eq!(json["tweet"]["lang"], "");
}

#[tokio::test]
async fn test_state_from_config_uses_configured_upstreams() {
    let config = Config {
        nitter_url: "http://nitter.local".to_string(),
        fxtwitter_url: "http://fx.local".to_string(),
        port: 8080,
        public_dir: public_dir(),
        debug: false,
    };
    let state = AppState::from_config(&config).unwrap();
    assert_eq!(state.nitter.base_url(), "http://nitter.local");
    assert_eq!(state.fxtwitter.base_url(), "http://fx.local");
}
