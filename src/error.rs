//! Error taxonomy shared by the upstream clients and the HTTP handlers.
//!
//! Every failure a client can produce is classified as one of the variants of
//! [`AppError`]. Only the HTTP boundary asks an error for its status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::debug;

/// Boxed error used as the cause of an upstream failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error reported by one of the upstream services.
#[derive(Debug, thiserror::Error)]
#[error("{service} error: {message}{}", detail(.status, .cause))]
pub struct UpstreamError {
    /// Name of the upstream service (`nitter`, `fxtwitter`)
    pub service: &'static str,
    /// Transport status or embedded code, when one was received
    pub status: Option<u16>,
    /// Human-readable description of what failed
    pub message: String,
    /// Underlying error, if any
    #[source]
    pub cause: Option<BoxError>,
}

impl UpstreamError {
    /// Creates an upstream error carrying a status code and no cause.
    pub fn with_status(service: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self {
            service,
            status: Some(status),
            message: message.into(),
            cause: None,
        }
    }

    /// Creates an upstream error wrapping an underlying failure.
    pub fn with_cause(
        service: &'static str,
        message: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self {
            service,
            status: None,
            message: message.into(),
            cause: Some(cause.into()),
        }
    }
}

/// Suffix appended to the message: the cause wins over the status.
fn detail(status: &Option<u16>, cause: &Option<BoxError>) -> String {
    match (cause, status) {
        (Some(cause), _) => format!(": {}", cause),
        (None, Some(status)) => format!(" (status: {})", status),
        (None, None) => String::new(),
    }
}

/// Classified application error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Invalid input supplied by the caller.
    #[error("validation error: {field} - {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    /// The requested resource does not exist upstream.
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },
    /// An upstream service failed or answered with something unusable.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    /// Anything not covered by the kinds above.
    #[error("{0}")]
    Internal(#[source] BoxError),
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Maps the error kind to the HTTP status returned to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        debug!("Responding with {}: {}", status, self);
        (status, self.to_string()).into_response()
    }
}
