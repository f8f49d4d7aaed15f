//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes under a per-router base prefix
//! - Match incoming paths against the table, first match wins
//! - Invoke the matched handler with request, env, url and params
//! - Rewrite the CORS response header when the router is restricted
//!
//! # Design Decisions
//! - Table order is insertion order, never specificity; applications
//!   register in priority order
//! - Re-registering a full pattern replaces its table in place, keeping
//!   the original position
//! - Immutable after setup; shared across requests without locks
//! - 404/405 are responses, not errors; handler errors propagate untouched

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use url::Url;

use crate::http::context::{HandlerContext, HandlerResult, WorkerEnv};
use crate::http::response;
use crate::routing::compose::FetchHandler;
use crate::routing::method::{Method, MethodTable};
use crate::routing::pattern::Pattern;
use crate::security::cors::CorsPolicy;

struct RouteEntry {
    pattern: Pattern,
    methods: MethodTable,
}

/// Pattern-based request router for a single base prefix.
pub struct EdgeRouter {
    base: String,
    cors: CorsPolicy,
    routes: Vec<RouteEntry>,
}

impl EdgeRouter {
    /// Router with no cross-origin allow-list.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            cors: CorsPolicy::unrestricted(),
            routes: Vec::new(),
        }
    }

    /// Router with an explicit cross-origin allow-list.
    pub fn with_allowed_origins(base: impl Into<String>, origins: Vec<String>) -> Self {
        Self {
            base: base.into(),
            cors: CorsPolicy::new(origins),
            routes: Vec::new(),
        }
    }

    /// Base prefix prepended to every registered pattern. Also decides
    /// which router owns a request when several are composed.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Cross-origin policy of this router.
    pub fn cors(&self) -> &CorsPolicy {
        &self.cors
    }

    /// Register a pattern (relative to the base) with its method table.
    ///
    /// Registering the same full pattern again replaces the table
    /// wholesale; methods absent from the new table become 405. Templates
    /// are not validated here — a malformed one simply never matches.
    pub fn register(&mut self, pattern: &str, methods: MethodTable) {
        let full = format!("{}{}", self.base, pattern);
        if let Some(entry) = self.routes.iter_mut().find(|e| e.pattern.raw() == full) {
            entry.methods = methods;
            return;
        }
        self.routes.push(RouteEntry {
            pattern: Pattern::compile(full),
            methods,
        });
    }

    /// Dispatch a request to the first matching route.
    ///
    /// Scans the table in registration order. No match yields 404, a match
    /// without a handler for the request method yields 405 — both as plain
    /// responses. Handler errors propagate to the caller unchanged.
    pub async fn dispatch(
        &self,
        request: Request<Body>,
        env: WorkerEnv,
        url: Url,
    ) -> HandlerResult {
        let path = url.path();

        let matched = self
            .routes
            .iter()
            .find_map(|entry| entry.pattern.match_path(path).map(|params| (entry, params)));

        let (entry, params) = match matched {
            Some(m) => m,
            None => {
                tracing::warn!(path = %path, base = %self.base, "No route matched");
                return Ok(self.finish(response::status(StatusCode::NOT_FOUND), None));
            }
        };

        let method = Method::parse(request.method().as_str());
        let handler = match method.and_then(|m| entry.methods.lookup(m)) {
            Some(h) => h.clone(),
            None => {
                tracing::debug!(
                    method = %request.method(),
                    pattern = %entry.pattern.raw(),
                    "Method not registered for route"
                );
                return Ok(self.finish(response::status(StatusCode::METHOD_NOT_ALLOWED), None));
            }
        };

        tracing::debug!(
            method = %request.method(),
            pattern = %entry.pattern.raw(),
            "Dispatching to handler"
        );

        // Origin is needed for the response rewrite after the request has
        // been moved into the handler context.
        let origin = request.headers().get(header::ORIGIN).cloned();

        let response = handler(HandlerContext {
            request,
            env,
            url,
            params,
        })
        .await?;

        Ok(self.finish(response, origin))
    }

    /// Apply the restricted-router CORS rewrite to an outgoing response.
    pub(crate) fn finish(
        &self,
        mut response: Response<Body>,
        origin: Option<header::HeaderValue>,
    ) -> Response<Body> {
        if self.cors.is_restricted() {
            if let Some(origin) = origin {
                response
                    .headers_mut()
                    .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            }
        }
        response
    }

    /// Compose this router with others into a top-level fetch entry point.
    ///
    /// This router's policy guards the whole entry point; routers are
    /// consulted in the given order, self first.
    pub fn into_fetch_handler(self, others: impl IntoIterator<Item = EdgeRouter>) -> FetchHandler {
        FetchHandler::new(self, others)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NoAssets;
    use crate::http::response;
    use std::sync::Arc;

    fn env() -> WorkerEnv {
        WorkerEnv::new(Arc::new(NoAssets))
    }

    fn get(path: &str) -> (Request<Body>, Url) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::default())
            .unwrap();
        let url = Url::parse(&format!("http://localhost{}", path)).unwrap();
        (request, url)
    }

    fn echo_router() -> EdgeRouter {
        let mut router = EdgeRouter::new("/api");
        router.register(
            "/echo/:word",
            MethodTable::new().get(|ctx| async move {
                let word = ctx.params.get("word").cloned().unwrap_or_default();
                Ok(response::text(word))
            }),
        );
        router
    }

    #[tokio::test]
    async fn test_matched_route_invokes_handler() {
        let router = echo_router();
        let (req, url) = get("/api/echo/hello");
        let resp = router.dispatch(req, env(), url).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"hello");
    }

    #[tokio::test]
    async fn test_unmatched_path_is_404() {
        let router = echo_router();
        let (req, url) = get("/api/missing");
        let resp = router.dispatch(req, env(), url).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unregistered_method_is_405() {
        let router = echo_router();
        let request = Request::builder()
            .method("POST")
            .uri("/api/echo/hello")
            .body(Body::default())
            .unwrap();
        let url = Url::parse("http://localhost/api/echo/hello").unwrap();
        let resp = router.dispatch(request, env(), url).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_first_match_wins_in_insertion_order() {
        let mut router = EdgeRouter::new("");
        router.register(
            "/things/:id",
            MethodTable::new().get(|_ctx| async { Ok(response::text("param")) }),
        );
        // Registered later, so the earlier param route shadows it.
        router.register(
            "/things/special",
            MethodTable::new().get(|_ctx| async { Ok(response::text("literal")) }),
        );

        let (req, url) = get("/things/special");
        let resp = router.dispatch(req, env(), url).await.unwrap();
        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"param");
    }

    #[tokio::test]
    async fn test_reregistration_replaces_table_wholesale() {
        let mut router = EdgeRouter::new("/api");
        router.register(
            "/item",
            MethodTable::new()
                .get(|_ctx| async { Ok(response::text("old-get")) })
                .post(|_ctx| async { Ok(response::text("old-post")) }),
        );
        router.register(
            "/item",
            MethodTable::new().get(|_ctx| async { Ok(response::text("new-get")) }),
        );

        let (req, url) = get("/api/item");
        let resp = router.dispatch(req, env(), url).await.unwrap();
        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"new-get");

        // POST disappeared with the old table.
        let request = Request::builder()
            .method("POST")
            .uri("/api/item")
            .body(Body::default())
            .unwrap();
        let url = Url::parse("http://localhost/api/item").unwrap();
        let resp = router.dispatch(request, env(), url).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_reregistration_keeps_table_position() {
        let mut router = EdgeRouter::new("");
        router.register(
            "/a/:x",
            MethodTable::new().get(|_ctx| async { Ok(response::text("first")) }),
        );
        router.register(
            "/a/b",
            MethodTable::new().get(|_ctx| async { Ok(response::text("second")) }),
        );
        // Replacing the first pattern must not move it behind the second.
        router.register(
            "/a/:x",
            MethodTable::new().get(|_ctx| async { Ok(response::text("replaced")) }),
        );

        let (req, url) = get("/a/b");
        let resp = router.dispatch(req, env(), url).await.unwrap();
        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"replaced");
    }

    #[tokio::test]
    async fn test_restricted_router_rewrites_allow_origin() {
        let mut router =
            EdgeRouter::with_allowed_origins("/api", vec!["https://app.example".to_string()]);
        router.register(
            "/ping",
            MethodTable::new().get(|_ctx| async { Ok(response::text("pong")) }),
        );

        let request = Request::builder()
            .method("GET")
            .uri("/api/ping")
            .header("Origin", "https://app.example")
            .body(Body::default())
            .unwrap();
        let url = Url::parse("http://localhost/api/ping").unwrap();
        let resp = router.dispatch(request, env(), url).await.unwrap();
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("https://app.example")
        );
    }

    #[tokio::test]
    async fn test_unrestricted_router_leaves_headers_alone() {
        let router = echo_router();
        let request = Request::builder()
            .method("GET")
            .uri("/api/echo/hi")
            .header("Origin", "https://app.example")
            .body(Body::default())
            .unwrap();
        let url = Url::parse("http://localhost/api/echo/hi").unwrap();
        let resp = router.dispatch(request, env(), url).await.unwrap();
        assert!(resp
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_handler_error_propagates() {
        let mut router = EdgeRouter::new("");
        router.register(
            "/boom",
            MethodTable::new()
                .get(|_ctx| async { Err::<Response<Body>, _>("handler exploded".into()) }),
        );
        let (req, url) = get("/boom");
        let err = router.dispatch(req, env(), url).await.unwrap_err();
        assert_eq!(err.to_string(), "handler exploded");
    }
}
