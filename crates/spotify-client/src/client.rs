use bytes::Bytes;
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use spotify_config::ClientConfig;
use url::Url;

use crate::error::{ClientError, HttpFailure, Result, SpotifyError};

/// Typed client for the Spotify Web API
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    base_url: Url,
    http: reqwest::Client,
    access_token: Option<SecretString>,
}

impl SpotifyClient {
    /// Create a new client pointing at the given base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn new(base_url: &str) -> std::result::Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::Config(format!("invalid base URL: {e}")))?;

        Ok(Self {
            base_url: normalize_base(base_url)?,
            http: reqwest::Client::new(),
            access_token: None,
        })
    }

    /// Create a client from loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is invalid or the HTTP client
    /// cannot be built
    pub fn from_config(config: &ClientConfig) -> std::result::Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = config.timeout().map_err(|e| ClientError::Config(e.to_string()))? {
            builder = builder.timeout(timeout);
        }

        if let Some(ref user_agent) = config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        Ok(Self {
            base_url: normalize_base(config.base_url.clone())?,
            http: builder.build()?,
            access_token: config.access_token.clone(),
        })
    }

    /// Set the OAuth access token sent with every request
    #[must_use]
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(SecretString::from(access_token.into()));
        self
    }

    /// Get the base URL
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET a resource and decode the JSON response
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API responds with a
    /// non-success status, or the response cannot be decoded
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with_query(path, &[]).await
    }

    /// GET a resource with query parameters and decode the JSON response
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API responds with a
    /// non-success status, or the response cannot be decoded
    pub async fn get_with_query<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        self.fetch_json(Method::GET, path, query, None::<&()>)
            .await
            .map_err(report)
    }

    /// POST a JSON body and decode the JSON response
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API responds with a
    /// non-success status, or the response cannot be decoded
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch_json(Method::POST, path, &[], Some(body))
            .await
            .map_err(report)
    }

    /// PUT a JSON body, ignoring any response body
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API responds with a
    /// non-success status
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.send(Method::PUT, path, &[], Some(body))
            .await
            .map(drop)
            .map_err(report)
    }

    /// DELETE a resource, ignoring any response body
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API responds with a
    /// non-success status
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, &[], None::<&()>)
            .await
            .map(drop)
            .map_err(report)
    }

    async fn fetch_json<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> std::result::Result<T, HttpFailure>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(method, path, query, body).await?;
        decode_json(response).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> std::result::Result<reqwest::Response, HttpFailure> {
        let url = make_url(&self.base_url, path)?;

        let mut builder = make_request(&self.http, method.clone(), &url, self.access_token.as_ref());

        if !query.is_empty() {
            builder = builder.query(query);
        }

        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;

        handle_error(method, response).await
    }
}

// -- Helper functions --

/// Ensure the base URL ends with `/` so relative paths extend it
fn normalize_base(mut base_url: Url) -> std::result::Result<Url, ClientError> {
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(ClientError::Config(format!(
            "base URL must use http or https: {base_url}"
        )));
    }

    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }

    Ok(base_url)
}

/// Resolve a request path against the base URL
///
/// The result must stay under the base URL so the access token is only
/// sent to the configured API.
fn make_url(base_url: &Url, path: &str) -> std::result::Result<Url, HttpFailure> {
    let url = base_url
        .join(path.trim_start_matches('/'))
        .map_err(|source| HttpFailure::InvalidPath {
            path: path.to_owned(),
            source,
        })?;

    if !url.as_str().starts_with(base_url.as_str()) {
        return Err(HttpFailure::OutsideBase {
            path: path.to_owned(),
            url,
        });
    }

    Ok(url)
}

/// Build an authenticated request
fn make_request(
    http: &reqwest::Client,
    method: Method,
    url: &Url,
    access_token: Option<&SecretString>,
) -> reqwest::RequestBuilder {
    let mut builder = http.request(method, url.as_str());

    if let Some(token) = access_token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()));
    }

    builder
}

/// Check an HTTP response for errors, keeping the body of failed responses
async fn handle_error(
    method: Method,
    response: reqwest::Response,
) -> std::result::Result<reqwest::Response, HttpFailure> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let body = response.bytes().await.unwrap_or_else(|e| {
        tracing::debug!(error = %e, %url, "failed to read error response body");
        Bytes::new()
    });

    Err(HttpFailure::Status {
        method,
        url,
        status,
        body,
    })
}

/// Decode a successful response body as JSON
async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> std::result::Result<T, HttpFailure> {
    let url = response.url().clone();
    let bytes = response.bytes().await?;

    serde_json::from_slice(&bytes).map_err(|source| HttpFailure::Decode { url, source })
}

/// Translate a failure into a typed error and log it
fn report(failure: HttpFailure) -> SpotifyError {
    let error = SpotifyError::from(failure);

    if let Some(details) = error.payload() {
        tracing::warn!(status = details.status, message = %details.message, "Web API returned an error");
    } else {
        tracing::debug!(kind = ?error.kind(), error = %error, "Web API request failed");
    }

    error
}
