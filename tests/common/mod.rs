//! In-process mock of the Syncthing REST API
//!
//! Serves canned responses keyed by path and query string and records every
//! request it receives.

#![allow(dead_code)] // Each test binary uses a different subset

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use syncthing_stats::config::Config;
use syncthing_stats::syncthing::SyncthingClient;

pub const API_KEY: &str = "test-api-key";

#[derive(Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn json(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: value.to_string(),
            delay: None,
        }
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path_and_query: String,
    pub api_key: Option<String>,
}

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<HashMap<String, MockResponse>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockDaemon {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockDaemon {
    /// Start serving `routes` on an ephemeral local port
    ///
    /// Keys are the request path plus query string, e.g. `/rest/db/status?folder=a`.
    pub async fn start(routes: Vec<(&str, MockResponse)>) -> Self {
        let state = MockState {
            routes: Arc::new(
                routes
                    .into_iter()
                    .map(|(path, response)| (path.to_string(), response))
                    .collect(),
            ),
            requests: Arc::default(),
        };
        let requests = state.requests.clone();

        let app = Router::new().fallback(respond).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock daemon");
        let addr = listener.local_addr().expect("Mock daemon has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock daemon failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests whose path and query start with `prefix`
    pub fn hits(&self, prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.path_and_query.starts_with(prefix))
            .count()
    }

    pub fn config(&self) -> Config {
        Config::new(self.base_url.clone(), API_KEY)
    }

    pub fn client(&self) -> SyncthingClient {
        SyncthingClient::new(&self.config()).expect("Failed to build client")
    }
}

async fn respond(State(state): State<MockState>, uri: Uri, headers: HeaderMap) -> Response {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    state.requests.lock().unwrap().push(RecordedRequest {
        path_and_query: path_and_query.clone(),
        api_key: headers
            .get("X-API-Key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    match state.routes.get(&path_and_query) {
        Some(response) => {
            if let Some(delay) = response.delay {
                tokio::time::sleep(delay).await;
            }
            (
                response.status,
                [(header::CONTENT_TYPE, "application/json")],
                response.body.clone(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "404 page not found").into_response(),
    }
}

/// Canned `rest/db/status` body with distinct values per counter
pub fn folder_status(seed: i64) -> Value {
    serde_json::json!({
        "errors": seed,
        "globalBytes": seed * 1000,
        "globalDeleted": seed + 1,
        "globalDirectories": seed + 2,
        "globalFiles": seed + 3,
        "globalSymlinks": seed + 4,
        "globalTotalItems": seed + 5,
        "inSyncBytes": seed * 900,
        "inSyncFiles": seed + 6,
        "localBytes": seed * 800,
        "localDeleted": seed + 7,
        "localDirectories": seed + 8,
        "localFiles": seed + 9,
        "localSymlinks": seed + 10,
        "localTotalItems": seed + 11,
        "needBytes": seed * 100,
        "needDeletes": seed + 12,
        "needDirectories": seed + 13,
        "needFiles": seed + 14,
        "needSymlinks": seed + 15,
        "needTotalItems": seed + 16,
        "pullErrors": seed + 17,
        "state": "idle",
        "version": 42
    })
}
