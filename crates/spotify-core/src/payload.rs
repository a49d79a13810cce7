use std::fmt;

use serde::{Deserialize, Serialize};

// -- Web API error body --

/// Error body returned by the Web API
///
/// `{ "error": { "status": 404, "message": "Not found" } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details, absent when the body carries no `error` object
    #[serde(default)]
    pub error: Option<ErrorDetails>,
}

/// Structured details of a Web API error
///
/// Both `status` and `message` are required; an error object missing either
/// does not decode and yields no details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Status code reported by the API, taken as-is from the body
    pub status: i32,
    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}
