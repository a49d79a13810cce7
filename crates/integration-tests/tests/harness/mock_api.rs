//! Mock Spotify Web API for integration tests
//!
//! Serves canned successes and the error bodies the real API returns

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// Access token accepted by the mock
pub const VALID_TOKEN: &str = "valid-token";

/// Mock Web API server, shut down on drop
pub struct MockApi {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockApiState>,
}

struct MockApiState {
    request_count: AtomicU32,
}

impl MockApi {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockApiState {
            request_count: AtomicU32::new(0),
        });

        let app = Router::new()
            .route("/v1/me", routing::get(handle_me))
            .route("/v1/tracks/{id}", routing::get(handle_track))
            .route("/v1/me/tracks", routing::delete(handle_remove_tracks))
            .route("/v1/me/player/pause", routing::put(handle_pause))
            .route("/v1/browse/broken", routing::get(handle_broken))
            .route("/v1/browse/gateway", routing::get(handle_gateway))
            .route("/v1/browse/garbage", routing::get(handle_garbage))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring a client, including `/v1`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// -- Wire types --

#[derive(Debug, Serialize)]
struct User {
    id: String,
    display_name: String,
}

#[derive(Debug, Serialize)]
struct Track {
    id: String,
    name: String,
}

/// Web API error body
fn api_error(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({
        "error": {
            "status": status.as_u16(),
            "message": message,
        }
    });

    (status, Json(body)).into_response()
}

/// Check the bearer token the way the Web API does
fn authorize(headers: &HeaderMap) -> Result<(), Response> {
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        None => Err(api_error(StatusCode::UNAUTHORIZED, "No token provided")),
        Some(value) if value == format!("Bearer {VALID_TOKEN}") => Ok(()),
        Some(_) => Err(api_error(StatusCode::UNAUTHORIZED, "Invalid access token")),
    }
}

// -- Handlers --

async fn handle_me(State(state): State<Arc<MockApiState>>, headers: HeaderMap) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    if let Err(response) = authorize(&headers) {
        return response;
    }

    Json(User {
        id: "wizzler".to_owned(),
        display_name: "JM Wizzler".to_owned(),
    })
    .into_response()
}

async fn handle_track(State(state): State<Arc<MockApiState>>, Path(id): Path<String>) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    if id == "11dFghVXANMlKmJXsNCbNl" {
        return Json(Track {
            id,
            name: "Cut To The Feeling".to_owned(),
        })
        .into_response();
    }

    api_error(StatusCode::NOT_FOUND, "Not found")
}

async fn handle_remove_tracks(State(state): State<Arc<MockApiState>>, headers: HeaderMap) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    if let Err(response) = authorize(&headers) {
        return response;
    }

    StatusCode::OK.into_response()
}

async fn handle_pause(State(state): State<Arc<MockApiState>>) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let body = serde_json::json!({
        "error": {
            "status": 403,
            "message": "Player command failed: Premium required",
            "reason": "PREMIUM_REQUIRED",
        }
    });

    (StatusCode::FORBIDDEN, Json(body)).into_response()
}

async fn handle_broken(State(state): State<Arc<MockApiState>>) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({}))).into_response()
}

async fn handle_gateway(State(state): State<Arc<MockApiState>>) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    (
        StatusCode::BAD_GATEWAY,
        [(header::CONTENT_TYPE, "text/html")],
        "<html><body><h1>502 Bad Gateway</h1></body></html>",
    )
        .into_response()
}

async fn handle_garbage(State(state): State<Arc<MockApiState>>) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    (StatusCode::OK, "definitely not json").into_response()
}
