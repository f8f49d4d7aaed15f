//! Path pattern compilation and matching.
//!
//! # Responsibilities
//! - Compile a path template into a sequence of segment matchers
//! - Match request paths segment-by-segment (same count, literals byte-equal)
//! - Capture named parameters from matching paths
//!
//! # Design Decisions
//! - Patterns compile once at registration, not on every dispatch
//! - A segment starting with `:` captures; everything else matches literally
//! - Captured values stay raw (no percent-decoding), matching is byte-exact
//! - Malformed templates are not rejected; they simply never match

use crate::http::context::PathParams;

/// One compiled pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Must equal the path segment byte-for-byte.
    Literal(String),
    /// Matches any single path segment, capturing it under the given name.
    Param(String),
}

/// A precompiled path pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compile a path template.
    ///
    /// Splitting mirrors a plain `split('/')`: a leading slash yields an
    /// empty first segment, which both sides of a match share.
    pub fn compile(template: impl Into<String>) -> Self {
        let raw = template.into();
        let segments = raw
            .split('/')
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Self { raw, segments }
    }

    /// The template string this pattern was compiled from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Match a request path against this pattern.
    ///
    /// Returns the captured parameters on a match, `None` otherwise. With
    /// duplicate parameter names the rightmost capture wins.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), (*part).to_string());
                }
            }
        }
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let pattern = Pattern::compile("/api/health");
        assert!(pattern.match_path("/api/health").is_some());
        assert!(pattern.match_path("/api/Health").is_none());
        assert!(pattern.match_path("/api/health/extra").is_none());
        assert!(pattern.match_path("/api").is_none());
    }

    #[test]
    fn test_param_capture() {
        let pattern = Pattern::compile("/users/:id/posts/:postId");
        let params = pattern.match_path("/users/42/posts/7").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
        assert_eq!(params.get("postId").map(String::as_str), Some("7"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_segment_count_must_match() {
        let pattern = Pattern::compile("/users/:id");
        assert!(pattern.match_path("/users").is_none());
        assert!(pattern.match_path("/users/42/posts").is_none());
    }

    #[test]
    fn test_captures_are_raw() {
        // Percent-escapes are not decoded.
        let pattern = Pattern::compile("/echo/:word");
        let params = pattern.match_path("/echo/a%20b").unwrap();
        assert_eq!(params.get("word").map(String::as_str), Some("a%20b"));
    }

    #[test]
    fn test_duplicate_param_last_capture_wins() {
        let pattern = Pattern::compile("/pair/:x/:x");
        let params = pattern.match_path("/pair/first/second").unwrap();
        assert_eq!(params.get("x").map(String::as_str), Some("second"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_root_pattern() {
        let pattern = Pattern::compile("/");
        assert!(pattern.match_path("/").is_some());
        assert!(pattern.match_path("/x").is_none());
    }

    #[test]
    fn test_param_matches_empty_segment() {
        // Trailing slash leaves an empty final segment; a param still
        // captures it. Registration-time laxness, documented.
        let pattern = Pattern::compile("/echo/:word");
        let params = pattern.match_path("/echo/").unwrap();
        assert_eq!(params.get("word").map(String::as_str), Some(""));
    }
}
