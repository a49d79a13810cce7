#![allow(clippy::must_use_candidate)]

//! HTTP client for the Spotify Web API
//!
//! Every failed call is returned as a [`SpotifyError`], which keeps the
//! underlying [`HttpFailure`] and any error details sent by the API

mod callback;
mod client;
pub mod error;

pub use callback::{SpotifyCallback, dispatch};
pub use client::SpotifyClient;
pub use error::{ClientError, HttpFailure, Result, SpotifyError};
pub use spotify_core::{ErrorDetails, ErrorKind, TransportError};
