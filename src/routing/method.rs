//! HTTP methods and per-route handler tables.
//!
//! # Responsibilities
//! - Enumerate the supported HTTP methods
//! - Hold one optional handler slot per method for a route
//! - Dispatch a request against a bare table (no router required)
//!
//! # Design Decisions
//! - Fixed-size slots instead of a string-keyed map; unsupported methods
//!   cannot be registered at all
//! - Method parsing is case-insensitive (the wire allows lowercase)
//! - Replacing a table is wholesale: tables are built once, never merged

use std::future::Future;

use crate::http::context::{handler, Handler, HandlerContext, HandlerResult};
use crate::http::response;

/// HTTP methods a route can carry a handler for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    /// All supported methods, in slot order.
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Patch,
        Method::Head,
        Method::Options,
    ];

    /// Parse a method name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "DELETE" => Some(Method::Delete),
            "PATCH" => Some(Method::Patch),
            "HEAD" => Some(Method::Head),
            "OPTIONS" => Some(Method::Options),
            _ => None,
        }
    }

    /// Canonical upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Per-route handler table with one slot per supported method.
#[derive(Clone, Default)]
pub struct MethodTable {
    slots: [Option<Handler>; 7],
}

impl MethodTable {
    /// Empty table: every method yields 405 until a slot is filled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the handler for a method, replacing any previous one.
    pub fn on<F, Fut>(mut self, method: Method, f: F) -> Self
    where
        F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.slots[method.index()] = Some(handler(f));
        self
    }

    /// Shorthand for [`MethodTable::on`] with GET.
    pub fn get<F, Fut>(self, f: F) -> Self
    where
        F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on(Method::Get, f)
    }

    /// Shorthand for [`MethodTable::on`] with POST.
    pub fn post<F, Fut>(self, f: F) -> Self
    where
        F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on(Method::Post, f)
    }

    /// Shorthand for [`MethodTable::on`] with PUT.
    pub fn put<F, Fut>(self, f: F) -> Self
    where
        F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on(Method::Put, f)
    }

    /// Shorthand for [`MethodTable::on`] with DELETE.
    pub fn delete<F, Fut>(self, f: F) -> Self
    where
        F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on(Method::Delete, f)
    }

    /// Look up the handler for a method.
    pub fn lookup(&self, method: Method) -> Option<&Handler> {
        self.slots[method.index()].as_ref()
    }

    /// Dispatch a request against this table alone, without a router.
    ///
    /// Unmapped (or unsupported) methods respond with 405 and a plain
    /// "Method not allowed" body. Handler errors propagate.
    pub async fn dispatch(&self, ctx: HandlerContext) -> HandlerResult {
        let method = Method::parse(ctx.request.method().as_str());
        match method.and_then(|m| self.lookup(m)) {
            Some(h) => h(ctx).await,
            None => Ok(response::text_status(
                axum::http::StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed",
            )),
        }
    }
}

impl std::fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registered: Vec<&str> = Method::ALL
            .iter()
            .filter(|m| self.lookup(**m).is_some())
            .map(|m| m.as_str())
            .collect();
        f.debug_struct("MethodTable")
            .field("methods", &registered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::collections::HashMap;
    use std::sync::Arc;
    use url::Url;

    fn ctx(method: &str) -> HandlerContext {
        let request = Request::builder()
            .method(method)
            .uri("/thing")
            .body(Body::default())
            .unwrap();
        HandlerContext {
            request,
            env: crate::http::context::WorkerEnv::new(Arc::new(
                crate::assets::NoAssets,
            )),
            url: Url::parse("http://localhost/thing").unwrap(),
            params: HashMap::new(),
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Method::parse("get"), Some(Method::Get));
        assert_eq!(Method::parse("Get"), Some(Method::Get));
        assert_eq!(Method::parse("DELETE"), Some(Method::Delete));
        assert_eq!(Method::parse("TRACE"), None);
    }

    #[tokio::test]
    async fn test_dispatch_mapped_method() {
        let table = MethodTable::new().get(|_ctx| async { Ok(response::text("ok")) });
        let resp = table.dispatch(ctx("GET")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dispatch_lowercase_method() {
        let table = MethodTable::new().get(|_ctx| async { Ok(response::text("ok")) });
        let resp = table.dispatch(ctx("get")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dispatch_unmapped_method_is_405() {
        let table = MethodTable::new().get(|_ctx| async { Ok(response::text("ok")) });
        let resp = table.dispatch(ctx("POST")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_on_replaces_slot() {
        let table = MethodTable::new()
            .get(|_ctx| async { Ok(response::text("first")) })
            .get(|_ctx| async { Ok(response::text("second")) });
        let resp = table.dispatch(ctx("GET")).await.unwrap();
        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"second");
    }
}
