use crate::payload::{ErrorDetails, ErrorResponse};
use crate::transport::TransportError;

/// Classification of a failed call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No usable HTTP response (connection failure, timeout, unreadable body)
    Transport,
    /// Non-success response carrying a Web API error body
    StatusWithPayload,
    /// Non-success response whose body is missing or not a Web API error
    StatusWithoutPayload,
}

/// Typed error for a failed Web API call
///
/// Always wraps the transport error that caused it. When the response body
/// followed the Web API error schema, the decoded [`ErrorDetails`] are
/// attached and the display message is built from them.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiError<E: TransportError> {
    #[source]
    underlying: E,
    payload: Option<ErrorDetails>,
    message: String,
}

/// Translate a transport error into a typed [`ApiError`]
///
/// A body that is missing or does not decode as an [`ErrorResponse`] yields
/// an error without payload whose message is the transport error's own text.
pub fn translate<E: TransportError>(underlying: E) -> ApiError<E> {
    match underlying.body_as::<ErrorResponse>() {
        Some(ErrorResponse {
            error: Some(details),
        }) => ApiError {
            message: details.to_string(),
            payload: Some(details),
            underlying,
        },
        _ => ApiError {
            message: underlying.to_string(),
            payload: None,
            underlying,
        },
    }
}

impl<E: TransportError> ApiError<E> {
    /// The transport error this error was translated from
    pub const fn underlying(&self) -> &E {
        &self.underlying
    }

    /// Consume the error, returning the transport error
    pub fn into_underlying(self) -> E {
        self.underlying
    }

    /// Whether the response carried Web API error details
    pub const fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Web API error details, if the response carried them
    pub const fn payload(&self) -> Option<&ErrorDetails> {
        self.payload.as_ref()
    }

    /// Human-readable message, `"<status> <message>"` when details are present
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status reported by the API, falling back to the transport's HTTP status
    ///
    /// A reported status that is not a valid HTTP status code is skipped.
    pub fn status(&self) -> Option<u16> {
        self.payload
            .as_ref()
            .and_then(|details| u16::try_from(details.status).ok())
            .or_else(|| self.underlying.status())
    }

    /// Classification of the failure, see [`ErrorKind`]
    pub fn kind(&self) -> ErrorKind {
        match (&self.payload, self.underlying.status()) {
            (Some(_), _) => ErrorKind::StatusWithPayload,
            (None, Some(_)) => ErrorKind::StatusWithoutPayload,
            (None, None) => ErrorKind::Transport,
        }
    }
}

impl<E: TransportError> From<E> for ApiError<E> {
    fn from(underlying: E) -> Self {
        translate(underlying)
    }
}
