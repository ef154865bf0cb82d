//! Errors surfaced by the API client

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when fetching a resource
///
/// None of these are retried; retry and backoff are left to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The resource identifier was malformed or rejected (HTTP 400)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The token is invalid or the caller's IP is not allow-listed (HTTP 403)
    #[error("Invalid API token: {0}")]
    InvalidApiToken(String),

    /// No resource exists for the identifier (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request quota has been exhausted (HTTP 429)
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// The upstream service failed or is under maintenance (HTTP 500, 503)
    #[error("API error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Any status the client has no mapping for
    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// HTTP request failed before a status was received
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL cannot carry resource paths
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Error document the service returns alongside non-200 statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    reason: Option<String>,
    message: Option<String>,
}

/// Pulls the service's own explanation out of an error body, if it sent one
fn upstream_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match (parsed.reason, parsed.message) {
        (Some(reason), Some(message)) => Some(format!("{} ({})", message, reason)),
        (None, Some(message)) => Some(message),
        (Some(reason), None) => Some(reason),
        (None, None) => None,
    }
}

fn with_detail(message: &str, body: &str) -> String {
    match upstream_detail(body) {
        Some(detail) => format!("{} Upstream said: {}", message, detail),
        None => message.to_string(),
    }
}

impl ApiError {
    /// Maps a non-200 response to its error kind
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            400 => ApiError::InvalidParameter(with_detail(
                "An invalid parameter was passed. Is the tag correct? \
                 Make sure it follows the format like: #2VVYYRVYP",
                body,
            )),
            403 => ApiError::InvalidApiToken(with_detail(
                "The token is invalid, or access has been blocked. \
                 Make sure your IP address is allow-listed for this token.",
                body,
            )),
            404 => ApiError::NotFound(with_detail("No resource exists for this tag.", body)),
            429 => ApiError::RateLimitExceeded(with_detail(
                "The rate limit for this token has been exceeded, please try again later.",
                body,
            )),
            500 => ApiError::ServerError {
                status,
                message: with_detail(
                    "Internal server error, please try again later. \
                     If the problem persists, contact the API provider.",
                    body,
                ),
            },
            503 => ApiError::ServerError {
                status,
                message: with_detail(
                    "The API is under maintenance or otherwise unavailable, \
                     please try again later.",
                    body,
                ),
            },
            _ => ApiError::UnexpectedStatus {
                status,
                body: body.to_string(),
            },
        }
    }

    /// The HTTP status this kind of error corresponds to, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::InvalidParameter(_) => Some(400),
            ApiError::InvalidApiToken(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::RateLimitExceeded(_) => Some(429),
            ApiError::ServerError { status, .. } | ApiError::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Parse(_) | ApiError::InvalidUrl(_) => None,
        }
    }
}
