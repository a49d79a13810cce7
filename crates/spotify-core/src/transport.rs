use serde::de::DeserializeOwned;

/// Error surfaced by the HTTP layer for a failed call
///
/// Implemented by each transport's error type. Translation only reads the
/// failing response through this trait, keeping typed errors decoupled
/// from any particular HTTP client.
pub trait TransportError: std::error::Error + 'static {
    /// Raw body of the failing response, if one was received
    fn response_body(&self) -> Option<&[u8]>;

    /// HTTP status of the failing response, if one was received
    fn status(&self) -> Option<u16>;

    /// Decode the response body as JSON of shape `T`
    ///
    /// Returns `None` when there is no body or it does not match `T`
    fn body_as<T: DeserializeOwned>(&self) -> Option<T>
    where
        Self: Sized,
    {
        let body = self.response_body().filter(|body| !body.is_empty())?;

        match serde_json::from_slice(body) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "response body does not match expected shape");
                None
            }
        }
    }
}
