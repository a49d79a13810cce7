#![allow(clippy::must_use_candidate)]

//! Typed errors for the Spotify Web API
//!
//! Turns a failed HTTP call into an [`ApiError`] that keeps the original
//! transport error and, when the server sent one, the structured error body

mod error;
mod payload;
mod transport;

pub use error::{ApiError, ErrorKind, translate};
pub use payload::{ErrorDetails, ErrorResponse};
pub use transport::TransportError;
