use crate::error::SpotifyError;

/// Receiver for the outcome of a Web API call
///
/// Lets call sites that hand results off (UI event loops, background
/// workers) handle success and typed failure separately:
///
/// ```rust,ignore
/// struct Saved;
///
/// impl SpotifyCallback<Vec<Track>> for Saved {
///     fn success(&mut self, tracks: Vec<Track>) { /* ... */ }
///     fn failure(&mut self, error: SpotifyError) { /* ... */ }
/// }
///
/// dispatch(client.get("me/tracks").await, &mut Saved);
/// ```
pub trait SpotifyCallback<T> {
    /// Called with the decoded response of a successful call
    fn success(&mut self, value: T);

    /// Called with the typed error of a failed call
    fn failure(&mut self, error: SpotifyError);
}

/// Route a call result to the matching callback method
///
/// Accepts raw transport failures as well as typed errors; transport
/// failures are translated before reaching [`SpotifyCallback::failure`].
pub fn dispatch<T, E, C>(result: Result<T, E>, callback: &mut C)
where
    E: Into<SpotifyError>,
    C: SpotifyCallback<T> + ?Sized,
{
    match result {
        Ok(value) => callback.success(value),
        Err(e) => callback.failure(e.into()),
    }
}
