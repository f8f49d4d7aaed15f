//! Shared utilities for integration testing.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use edge_router::http::response;
use edge_router::http::HandlerResult;
use edge_router::{AssetFetcher, WorkerEnv};

/// Asset stub that records how often it was hit and returns a fixed body.
pub struct RecordingAssets {
    hits: AtomicUsize,
    body: &'static str,
}

impl RecordingAssets {
    pub fn new(body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            hits: AtomicUsize::new(0),
            body,
        })
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetFetcher for RecordingAssets {
    async fn fetch(&self, _request: Request<Body>) -> HandlerResult {
        self.hits.fetch_add(1, Ordering::SeqCst);
        Ok(response::text(self.body))
    }
}

/// Environment around a recording asset stub.
pub fn env_with(assets: Arc<RecordingAssets>) -> WorkerEnv {
    WorkerEnv::new(assets)
}

/// Same-site request, the shape a browser sends for first-party fetches.
pub fn same_site(method: &str, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("sec-fetch-site", "same-origin")
        .body(Body::default())
        .unwrap()
}

/// Read a response body to a string.
#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
