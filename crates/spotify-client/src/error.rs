use bytes::Bytes;
use reqwest::{Method, StatusCode};
use spotify_core::{ApiError, TransportError};
use url::Url;

/// Client-specific result type
pub type Result<T> = std::result::Result<T, SpotifyError>;

/// Typed error for a failed Web API call
pub type SpotifyError = ApiError<HttpFailure>;

/// Failure surfaced by the HTTP layer
#[derive(Debug, thiserror::Error)]
pub enum HttpFailure {
    /// Connection, timeout, or body read error
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("{method} {url} failed with status {status}")]
    Status {
        /// Request method
        method: Method,
        /// Request URL
        url: Url,
        /// Response status
        status: StatusCode,
        /// Raw response body
        body: Bytes,
    },

    /// Successful response did not decode as the expected type
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// Request URL
        url: Url,
        /// JSON error
        source: serde_json::Error,
    },

    /// Request path could not be resolved against the base URL
    #[error("invalid request path '{path}': {source}")]
    InvalidPath {
        /// Path as given by the caller
        path: String,
        /// URL parse error
        source: url::ParseError,
    },

    /// Request path resolved to a URL outside the base URL
    #[error("request path '{path}' resolves outside the base URL: {url}")]
    OutsideBase {
        /// Path as given by the caller
        path: String,
        /// URL the path resolved to
        url: Url,
    },
}

impl TransportError for HttpFailure {
    fn response_body(&self) -> Option<&[u8]> {
        match self {
            Self::Status { body, .. } => Some(&body[..]),
            Self::Network(_) | Self::Decode { .. } | Self::InvalidPath { .. } | Self::OutsideBase { .. } => None,
        }
    }

    fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(status.as_u16()),
            Self::Network(e) => e.status().map(|status| status.as_u16()),
            Self::Decode { .. } | Self::InvalidPath { .. } | Self::OutsideBase { .. } => None,
        }
    }
}

/// Errors building a client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}
