//! HTTP response building module
//!
//! Responses the server sends on its own when no handler answers a request.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{Response, StatusCode};

const NOT_FOUND_BODY: &str = r#"{"error":"Not Found"}"#;

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from_static(NOT_FOUND_BODY.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            let mut response = Response::new(Full::new(Bytes::from_static(b"404 Not Found")));
            *response.status_mut() = StatusCode::NOT_FOUND;
            response
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
