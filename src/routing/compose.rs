//! Composition of routers into one fetch entry point.
//!
//! # Responsibilities
//! - Apply the cross-origin policy before any routing
//! - Pick the owning router by base-prefix, in composition order
//! - Fall back to the environment's static-asset capability
//!
//! # Design Decisions
//! - The primary router's policy guards the whole entry point
//! - First base-prefix match wins; an empty base catches everything
//! - The asset fallback response is returned verbatim, apart from the
//!   restricted-router CORS rewrite

use axum::body::Body;
use axum::http::{header, Request, StatusCode};

use crate::http::context::{request_url, HandlerResult, WorkerEnv};
use crate::http::response;
use crate::routing::router::EdgeRouter;

/// Top-level entry point composed from one or more routers.
pub struct FetchHandler {
    routers: Vec<EdgeRouter>,
}

impl FetchHandler {
    /// Compose a primary router with any number of additional ones.
    pub fn new(primary: EdgeRouter, others: impl IntoIterator<Item = EdgeRouter>) -> Self {
        let mut routers = vec![primary];
        routers.extend(others);
        Self { routers }
    }

    /// Handle one inbound request.
    ///
    /// Policy rejection short-circuits to 403 before any route matching.
    /// Requests outside every router's base go to the asset fallback.
    /// Handler errors propagate; 403/404/405 do not.
    pub async fn fetch(&self, request: Request<Body>, env: WorkerEnv) -> HandlerResult {
        let primary = &self.routers[0];

        if !primary.cors().allows(&request) {
            tracing::warn!(
                path = %request.uri().path(),
                origin = ?request.headers().get(header::ORIGIN),
                "Request rejected by cross-origin policy"
            );
            return Ok(response::status(StatusCode::FORBIDDEN));
        }

        let url = request_url(&request)?;

        for router in &self.routers {
            if url.path().starts_with(router.base()) {
                return router.dispatch(request, env, url).await;
            }
        }

        let origin = request.headers().get(header::ORIGIN).cloned();
        let response = env.assets.fetch(request).await?;
        Ok(primary.finish(response, origin))
    }
}
