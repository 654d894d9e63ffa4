//! Error classification for calls to the remote services.
//!
//! Prediction failures are sorted into four kinds so the form can show a
//! message that tells the user what to do next:
//!
//! - [`PredictionError::Validation`]: rejected locally, nothing was sent
//! - [`PredictionError::Server`]: the service answered with a non-2xx status
//! - [`PredictionError::Network`]: the service could not be reached at all
//! - [`PredictionError::Unexpected`]: anything else (bad body, client setup)
//!
//! Field store failures are not classified; [`StoreError`] only carries a
//! message for display.

use agri_core::ValidationError;
use reqwest::StatusCode;
use thiserror::Error;

/// Maximum number of characters of a plain-text error body to surface.
const MAX_DETAIL_CHARS: usize = 200;

// ---------------------------------------------------------------------------
// Prediction errors
// ---------------------------------------------------------------------------

/// Why a prediction submission failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Server error {status}: {detail}")]
    Server { status: u16, detail: String },

    #[error(
        "Could not reach the prediction service at {url}. Please verify that the backend is running."
    )]
    Network { url: String, reason: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Coarse category of a [`PredictionError`], for styling and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionErrorKind {
    Validation,
    Server,
    Network,
    Unexpected,
}

impl PredictionError {
    pub fn kind(&self) -> PredictionErrorKind {
        match self {
            PredictionError::Validation(_) => PredictionErrorKind::Validation,
            PredictionError::Server { .. } => PredictionErrorKind::Server,
            PredictionError::Network { .. } => PredictionErrorKind::Network,
            PredictionError::Unexpected(_) => PredictionErrorKind::Unexpected,
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Build a server error from a status and the raw response body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        Self::Server {
            status: status.as_u16(),
            detail: error_detail(status, body),
        }
    }

    /// Classify a transport-level failure from reqwest.
    pub fn from_transport(err: &reqwest::Error, url: &str) -> Self {
        if is_unreachable(err) {
            Self::Network {
                url: url.to_string(),
                reason: err.to_string(),
            }
        } else {
            Self::Unexpected(err.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Field store errors
// ---------------------------------------------------------------------------

/// A failed field store call; only the message is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Could not reach the field store: {0}")]
    Unreachable(String),

    #[error("Invalid response from the field store: {0}")]
    Decode(String),

    #[error("{0}")]
    Rejected(String),
}

impl StoreError {
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        Self::Status {
            status: status.as_u16(),
            message: error_detail(status, body),
        }
    }

    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Unreachable(err.to_string())
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Connection refused, DNS failure, and timeouts all mean "not reachable".
fn is_unreachable(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}

/// Pull a human-readable detail out of an error response body.
///
/// Looks for `detail`, `error`, then `message` in a JSON object, falls back
/// to the (truncated) body text, and finally to the canonical status reason.
pub fn error_detail(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(trimmed)
    {
        for key in ["detail", "error", "message"] {
            match map.get(key) {
                Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
                    return s.trim().to_string()
                }
                Some(serde_json::Value::Null) | None => {}
                Some(serde_json::Value::String(_)) => {}
                Some(other) => return other.to_string(),
            }
        }
    } else if !trimmed.is_empty() && !trimmed.starts_with('<') {
        return trimmed.chars().take(MAX_DETAIL_CHARS).collect();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
