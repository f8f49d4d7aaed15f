//! Static asset fallback capability.
//!
//! # Data Flow
//! ```text
//! Request outside every router's base
//!     → FetchHandler::fetch (no base-prefix match)
//!     → WorkerEnv.assets (AssetFetcher capability)
//!     → Response returned verbatim to the client
//! ```
//!
//! # Design Decisions
//! - The capability is a trait object on the environment, mirroring the
//!   host-binding shape of edge runtimes
//! - A missing file is a 404 response, not an error; only I/O failures
//!   beyond "not found" surface as errors
//! - Directory serving resolves `/` to `index.html` and refuses any path
//!   that escapes the root

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use std::path::{Component, Path, PathBuf};

use crate::http::context::HandlerResult;
use crate::http::response;

/// Error serving an asset from disk.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Host capability that serves a response for an unrouted request.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Produce a response for the request. "Not found" is a 404 response;
    /// an `Err` means the capability itself failed.
    async fn fetch(&self, request: Request<Body>) -> HandlerResult;
}

/// Capability that has no assets and answers 404 to everything.
pub struct NoAssets;

#[async_trait]
impl AssetFetcher for NoAssets {
    async fn fetch(&self, _request: Request<Body>) -> HandlerResult {
        Ok(response::status(StatusCode::NOT_FOUND))
    }
}

/// Filesystem-backed asset fetcher for the dev server.
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    /// Serve files under the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a request path onto a file under the root.
    ///
    /// Rejects parent-directory and absolute components so a crafted path
    /// cannot escape the root. An empty path becomes `index.html`.
    fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let trimmed = request_path.trim_start_matches('/');
        let relative = if trimmed.is_empty() {
            Path::new("index.html")
        } else {
            Path::new(trimmed)
        };

        for component in relative.components() {
            match component {
                Component::Normal(_) => {}
                _ => return None,
            }
        }

        Some(self.root.join(relative))
    }
}

#[async_trait]
impl AssetFetcher for DirectoryAssets {
    async fn fetch(&self, request: Request<Body>) -> HandlerResult {
        let path = match self.resolve(request.uri().path()) {
            Some(p) => p,
            None => {
                tracing::warn!(path = %request.uri().path(), "Rejected asset path");
                return Ok(response::status(StatusCode::NOT_FOUND));
            }
        };

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let mime = mime_guess::from_path(&path).first_or_octet_stream();
                let resp = Response::builder()
                    .status(StatusCode::OK)
                    .header(header::CONTENT_TYPE, mime.as_ref())
                    .body(Body::from(bytes))?;
                Ok(resp)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(response::status(StatusCode::NOT_FOUND))
            }
            Err(e) => Err(AssetError::Io(e).into()),
        }
    }
}
