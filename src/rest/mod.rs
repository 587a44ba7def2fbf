//! REST API module
//!
//! Resolves requests under [`API_PREFIX`] to read-only JSON projections of the
//! current configuration snapshot. Anything else is left to the caller.

mod error;
mod response;
pub mod streamers;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, Uri};

use crate::config::Config;
use crate::logger;

pub use error::RestError;

pub const API_PREFIX: &str = "/api";
const STREAMERS_PREFIX: &str = "/streamers";

/// API entry point
///
/// Returns `None` when the request is not an API request (missing or
/// malformed URI, unknown path) or when the response could not be produced.
/// The server decides what the client sees in that case.
pub fn handle_request(
    snapshot: &Config,
    method: &Method,
    uri: Option<&str>,
) -> Option<Response<Full<Bytes>>> {
    match route(snapshot, method, uri) {
        Ok(response) => Some(response),
        Err(e) if e.is_internal() => {
            logger::log_error(&format!("[API] {method} {}: {e}", uri.unwrap_or("-")));
            None
        }
        Err(e) => {
            logger::log_debug(&format!("[API] not handled: {e}"));
            None
        }
    }
}

/// Dispatch based on the path component of `uri`
fn route(
    snapshot: &Config,
    method: &Method,
    uri: Option<&str>,
) -> Result<Response<Full<Bytes>>, RestError> {
    let uri: Uri = uri.ok_or(RestError::MissingUri)?.parse()?;
    let path = uri.path();

    let request_path = path
        .strip_prefix(API_PREFIX)
        .ok_or_else(|| RestError::NoRouteMatch(path.to_string()))?;

    if let Some(sub_path) = request_path.strip_prefix(STREAMERS_PREFIX) {
        return streamers::handle_streamers_request(snapshot, method, sub_path);
    }

    Err(RestError::NoRouteMatch(path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReStreamer;
    use http_body_util::BodyExt;
    use hyper::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
    use hyper::StatusCode;

    fn cam1_snapshot() -> Config {
        Config::with_restreamers([(
            "cam1",
            ReStreamer {
                source: "rtsp://x".to_string(),
                description: "Front".to_string(),
                key: "secret".to_string(),
                enabled: true,
            },
        )])
    }

    async fn body_json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_streamers_scenario() {
        let response = handle_request(&cam1_snapshot(), &Method::GET, Some("/api/streamers"))
            .expect("streamers route should be handled");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

        let expected = serde_json::json!([{
            "id": "cam1",
            "source": "rtsp://x",
            "description": "Front",
            "key": true,
            "enabled": true
        }]);
        assert_eq!(body_json(response).await, expected);
    }

    #[tokio::test]
    async fn test_empty_snapshot_scenario() {
        let snapshot = Config::with_restreamers([]);
        let response = handle_request(&snapshot, &Method::GET, Some("/api/streamers")).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"[]");
    }

    #[test]
    fn test_unknown_api_path_not_handled() {
        assert!(handle_request(&cam1_snapshot(), &Method::GET, Some("/api/other")).is_none());
        assert!(handle_request(&cam1_snapshot(), &Method::GET, Some("/api")).is_none());
        assert!(handle_request(&cam1_snapshot(), &Method::GET, Some("/api/")).is_none());
    }

    #[test]
    fn test_paths_outside_api_not_handled() {
        let snapshot = cam1_snapshot();
        let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::HEAD];
        let uris = ["/", "/streamers", "/apis/streamers", "/v1/api/streamers", "/API/streamers"];
        for method in &methods {
            for uri in uris {
                assert!(
                    handle_request(&snapshot, method, Some(uri)).is_none(),
                    "{method} {uri} should not be handled"
                );
            }
        }
    }

    #[test]
    fn test_any_streamers_suffix_is_handled() {
        let snapshot = cam1_snapshot();
        let uris = [
            "/api/streamers",
            "/api/streamers/",
            "/api/streamers/cam1",
            "/api/streamersXYZ",
            "/api/streamers?enabled=true",
            "http://example.com:8080/api/streamers",
        ];
        for uri in uris {
            assert!(
                handle_request(&snapshot, &Method::GET, Some(uri)).is_some(),
                "{uri} should be handled"
            );
        }
    }

    #[test]
    fn test_method_is_not_discriminated() {
        let snapshot = cam1_snapshot();
        for method in [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS] {
            assert!(handle_request(&snapshot, &method, Some("/api/streamers")).is_some());
        }
    }

    #[test]
    fn test_missing_or_malformed_uri_not_handled() {
        let snapshot = cam1_snapshot();
        assert!(handle_request(&snapshot, &Method::GET, None).is_none());
        assert!(handle_request(&snapshot, &Method::GET, Some("")).is_none());
        assert!(handle_request(&snapshot, &Method::GET, Some("/api/stream ers")).is_none());

        assert!(matches!(
            route(&snapshot, &Method::GET, Some("/api/stream ers")),
            Err(RestError::MalformedUri(_))
        ));
        assert!(matches!(
            route(&snapshot, &Method::GET, None),
            Err(RestError::MissingUri)
        ));
        assert!(matches!(
            route(&snapshot, &Method::GET, Some("/api/other")),
            Err(RestError::NoRouteMatch(_))
        ));
    }

    #[test]
    fn test_double_slash_target_is_a_path() {
        let snapshot = cam1_snapshot();
        assert!(matches!(
            route(&snapshot, &Method::GET, Some("//host/api/streamers")),
            Err(RestError::NoRouteMatch(path)) if path == "//host/api/streamers"
        ));
    }

    #[test]
    fn test_cors_header_follows_config() {
        let mut snapshot = cam1_snapshot();
        let response = handle_request(&snapshot, &Method::GET, Some("/api/streamers")).unwrap();
        assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());

        snapshot.http.allow_any_origin = true;
        let response = handle_request(&snapshot, &Method::GET, Some("/api/streamers")).unwrap();
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_identical_requests_identical_bodies() {
        let snapshot = cam1_snapshot();
        let first = handle_request(&snapshot, &Method::GET, Some("/api/streamers")).unwrap();
        let second = handle_request(&snapshot, &Method::GET, Some("/api/streamers")).unwrap();
        let first = first.into_body().collect().await.unwrap().to_bytes();
        let second = second.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(first, second);
    }
}
