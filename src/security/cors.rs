//! Cross-origin access policy.
//!
//! # Responsibilities
//! - Decide whether a request may enter routing at all
//! - Evaluate fetch-metadata headers (Sec-Fetch-Mode, Sec-Fetch-Site)
//! - Check the Origin header against a configured allow-list
//!
//! # Design Decisions
//! - Navigations and same-site fetches are always allowed
//! - An empty allow-list means no cross-origin allowance at all, not
//!   "allow everything"
//! - `*` in the allow-list accepts any Origin value
//! - Origin comparison is exact string equality, no wildcard suffixes

use axum::body::Body;
use axum::http::{header, Request};

/// Wildcard allow-list entry accepting any Origin.
pub const ANY_ORIGIN: &str = "*";

/// Cross-origin access policy for a router.
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    allow_origins: Vec<String>,
}

impl CorsPolicy {
    /// Policy with an explicit allow-list.
    pub fn new(allow_origins: Vec<String>) -> Self {
        Self { allow_origins }
    }

    /// Policy with no cross-origin allowance beyond navigation/same-site.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// True when an allow-list is configured. Restricted routers rewrite
    /// the `Access-Control-Allow-Origin` header on responses they produce.
    pub fn is_restricted(&self) -> bool {
        !self.allow_origins.is_empty()
    }

    /// Evaluate the policy for a request.
    pub fn allows(&self, request: &Request<Body>) -> bool {
        let header_value = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
        };

        // Top-level navigations are always allowed.
        if header_value("sec-fetch-mode") == "navigate" {
            return true;
        }

        // Same-site fetches are always allowed. same-origin implies
        // same-site, so both metadata values pass.
        let site = header_value("sec-fetch-site");
        if site == "same-origin" || site == "same-site" {
            return true;
        }

        if self.allow_origins.is_empty() {
            return false;
        }

        if self.allow_origins.iter().any(|o| o == ANY_ORIGIN) {
            return true;
        }

        let origin = request
            .headers()
            .get(header::ORIGIN)
            .and_then(|v| v.to_str().ok());
        match origin {
            Some(origin) => self.allow_origins.iter().any(|o| o == origin),
            None => false,
        }
    }
}
