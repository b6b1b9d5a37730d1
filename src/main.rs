//! # TwitterX Gateway
//!
//! HTTP gateway exposing Nitter RSS feeds and the FxTwitter metadata API as a
//! small REST API.
//!
//! ## Environment Variables
//!
//! - `NITTER_URL`: Base URL of the Nitter instance (required)
//! - `FXTWITTER_URL`: Base URL of the FxTwitter API (optional)
//! - `PORT`: Server port (defaults to 8080)
//! - `PUBLIC_DIR`: UI asset directory (defaults to `public`)
//! - `DEBUG`: Enables debug logging when `RUST_LOG` is not set

use std::net::SocketAddr;
use std::process::ExitCode;

use log::{error, info};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use twitterx_gateway::{create_app, AppState, Config};

/// Main entry point for the gateway.
///
/// Loads the configuration, initializes logging, and serves requests until
/// the process receives Ctrl-C.
///
/// # Logging
///
/// `RUST_LOG` takes precedence; otherwise the level is `info`, or `debug`
/// when `DEBUG` is set.
///
/// # Example Usage
///
/// ```bash
/// NITTER_URL=http://localhost:8081 cargo run
///
/// # Run with debug logging
/// NITTER_URL=http://localhost:8081 DEBUG=1 cargo run
/// ```
#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();

    let level = config
        .as_ref()
        .map(Config::log_level)
        .unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to build HTTP clients: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Using Nitter instance: {}", state.nitter.base_url());
    info!("Using FxTwitter API: {}", state.fxtwitter.base_url());

    let app = create_app(state, &config.public_dir)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server starting on http://{}", addr);
    info!("Debug mode: {}", config.debug);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("HTTP server error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Server stopped");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
