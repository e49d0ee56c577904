//! Typed failures of a single TMDB request.

use thiserror::Error;

/// Error returned by every TMDB request.
///
/// Renderers catch it at the top level, log it, and show an inline
/// message. It is never retried.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The API answered with a non-2xx status.
    #[error("TMDB API error (HTTP {status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// TMDB `status_message`, or the raw body when it is not a TMDB error document.
        message: String,
    },
    /// The request failed before a response was received.
    #[error("request failed: {path}")]
    Transport {
        /// Relative resource path.
        path: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The response body did not match the expected schema.
    #[error("failed to decode JSON response: {path}")]
    Decode {
        /// Relative resource path.
        path: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// The relative path could not be joined onto the base URL.
    #[error("failed to join URL path: {path}")]
    InvalidUrl {
        /// Relative resource path.
        path: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },
}

impl HttpError {
    /// Returns the HTTP status code, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|status| status.as_u16()),
            Self::Decode { .. } | Self::InvalidUrl { .. } => None,
        }
    }

    /// Whether the API reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
