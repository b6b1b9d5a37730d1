//! Configuration module for the gateway.
//!
//! All settings come from environment variables and are read once at startup
//! into a [`Config`] value that is handed to the components that need it.

use std::env;
use std::path::PathBuf;

use log::LevelFilter;
use thiserror::Error;
use url::Url;

use crate::twitter::FXTWITTER_API_BASE_URL;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("{var} is not a valid URL ({value}): {source}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        source: url::ParseError,
    },
    #[error("{var} must use http or https, got '{scheme}'")]
    UnsupportedScheme { var: &'static str, scheme: String },
    #[error("PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),
}

/// Gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the Nitter instance (`NITTER_URL`, required)
    pub nitter_url: String,
    /// Base URL of the FxTwitter API (`FXTWITTER_URL`)
    pub fxtwitter_url: String,
    /// Listen port (`PORT`, defaults to 8080)
    pub port: u16,
    /// Directory holding the UI pages and `static/` assets (`PUBLIC_DIR`)
    pub public_dir: PathBuf,
    /// Verbose logging (`DEBUG` set to any non-empty value)
    pub debug: bool,
}

impl Config {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails if `NITTER_URL` is missing, any URL is malformed, or `PORT` is not
    /// a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let nitter_url = get("NITTER_URL").ok_or(ConfigError::Missing("NITTER_URL"))?;
        let nitter_url = validate_base_url("NITTER_URL", &nitter_url)?;

        let fxtwitter_url = match get("FXTWITTER_URL") {
            Some(value) => validate_base_url("FXTWITTER_URL", &value)?,
            None => FXTWITTER_API_BASE_URL.to_string(),
        };

        let port: u16 = match get("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        let public_dir = get("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR));

        Ok(Self {
            nitter_url,
            fxtwitter_url,
            port,
            public_dir,
            debug: get("DEBUG").is_some(),
        })
    }

    /// Default log level when `RUST_LOG` is not set.
    pub fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

/// Checks that `value` is an absolute http(s) URL and strips any trailing `/`.
fn validate_base_url(var: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        var,
        value: value.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(value.trim_end_matches('/').to_string()),
        scheme => Err(ConfigError::UnsupportedScheme {
            var,
            scheme: scheme.to_string(),
        }),
    }
}
