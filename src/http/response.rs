//! Response construction helpers.
//!
//! # Responsibilities
//! - Build the bare status responses the router produces (403/404/405)
//! - Build plain-text and JSON handler responses
//!
//! # Design Decisions
//! - Router-produced statuses carry empty bodies; the reason phrase is
//!   all a client is guaranteed
//! - JSON serialization failure degrades to a 500 rather than panicking

use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use serde::Serialize;

/// Response with the given status and an empty body.
pub fn status(code: StatusCode) -> Response<Body> {
    let mut resp = Response::new(Body::empty());
    *resp.status_mut() = code;
    resp
}

/// Response with the given status and a plain-text body.
pub fn text_status(code: StatusCode, body: impl Into<String>) -> Response<Body> {
    let mut resp = Response::new(Body::from(body.into()));
    *resp.status_mut() = code;
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    resp
}

/// 200 response with a plain-text body.
pub fn text(body: impl Into<String>) -> Response<Body> {
    text_status(StatusCode::OK, body)
}

/// 200 response with a JSON-encoded body and content type.
pub fn json<T: Serialize>(value: &T) -> Response<Body> {
    match serde_json::to_vec(value) {
        Ok(bytes) => {
            let mut resp = Response::new(Body::from(bytes));
            resp.headers_mut().insert(
                header::CONTENT_TYPE,
                header::HeaderValue::from_static("application/json"),
            );
            resp
        }
        Err(e) => {
            tracing::error!(error = %e, "JSON response serialization failed");
            status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_has_empty_body() {
        let resp = status(StatusCode::NOT_FOUND);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_json_sets_content_type_and_body() {
        let resp = json(&json!({"status": "ok"}));
        assert_eq!(
            resp.headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], br#"{"status":"ok"}"#);
    }

    #[test]
    fn test_text_sets_content_type() {
        let resp = text("hello");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("text/plain; charset=utf-8")
        );
    }
}
