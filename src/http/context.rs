//! Handler context and environment bindings.
//!
//! # Responsibilities
//! - Define the handler function contract (context in, response out)
//! - Carry environment bindings (asset capability + opaque vars) to handlers
//! - Derive an absolute URL from an incoming request
//!
//! # Design Decisions
//! - Handlers own their request; nothing is shared across requests
//! - Handler errors are boxed and propagate untouched to the caller
//! - Environment vars pass through as-is; the router never interprets them

use axum::body::Body;
use axum::http::Request;
use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use url::Url;

use crate::assets::AssetFetcher;

/// Error type produced by handlers. The routing layer never inspects it,
/// it only passes it up to the caller.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a handler invocation.
pub type HandlerResult = Result<axum::http::Response<Body>, BoxError>;

/// Type-erased async handler stored in a method table.
pub type Handler = Arc<dyn Fn(HandlerContext) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Path parameters captured during pattern matching.
///
/// Values are raw path segment substrings. No percent-decoding is applied,
/// so `/echo/a%20b` captures `a%20b` literally.
pub type PathParams = HashMap<String, String>;

/// Wrap an async function into a boxed [`Handler`].
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

/// Environment bindings supplied by the hosting runtime.
///
/// Carries the static-asset capability used as the routing fallback plus an
/// opaque string map that handlers may read. The router itself only touches
/// `assets`.
#[derive(Clone)]
pub struct WorkerEnv {
    /// Static asset capability, used when no route matches.
    pub assets: Arc<dyn AssetFetcher>,

    /// Opaque bindings passed through to handlers untouched.
    pub vars: HashMap<String, String>,
}

impl WorkerEnv {
    /// Create an environment around an asset capability.
    pub fn new(assets: Arc<dyn AssetFetcher>) -> Self {
        Self {
            assets,
            vars: HashMap::new(),
        }
    }

    /// Add an opaque binding.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

/// Everything a handler receives for a single request.
pub struct HandlerContext {
    /// The incoming request, owned by the handler.
    pub request: Request<Body>,

    /// Environment bindings.
    pub env: WorkerEnv,

    /// Parsed absolute URL of the request.
    pub url: Url,

    /// Captured path parameters.
    pub params: PathParams,
}

/// Build an absolute URL for a request.
///
/// Edge runtimes hand handlers an absolute URL; plain HTTP/1.1 requests
/// usually carry only a path in the request line, so the authority is
/// recovered from the Host header (falling back to `localhost`).
pub fn request_url(request: &Request<Body>) -> Result<Url, url::ParseError> {
    let uri = request.uri();
    if uri.scheme().is_some() && uri.authority().is_some() {
        return Url::parse(&uri.to_string());
    }

    let host = request
        .headers()
        .get(axum::http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    Url::parse(&format!("http://{}{}", host, path_and_query))
}
