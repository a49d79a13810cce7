#![allow(clippy::must_use_candidate)]

//! Configuration for the Spotify Web API client
//!
//! Loaded from TOML, with `{{ env.VAR }}` placeholders expanded before parsing

mod env;
mod loader;

use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default Web API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.spotify.com/v1/";

/// Web API client configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL that request paths are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// OAuth access token sent as a bearer token
    #[serde(default)]
    pub access_token: Option<SecretString>,
    /// Request timeout (e.g. `"30s"`, `"1m 30s"`)
    #[serde(default)]
    pub timeout: Option<String>,
    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            timeout: None,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Parsed request timeout, if one is configured
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is not a valid duration
    pub fn timeout(&self) -> anyhow::Result<Option<Duration>> {
        self.timeout
            .as_deref()
            .map(|s| duration_str::parse(s).map_err(|e| anyhow::anyhow!("invalid timeout '{s}': {e}")))
            .transpose()
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL must be valid")
}
