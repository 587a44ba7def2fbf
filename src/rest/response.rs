// REST response packaging

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use hyper::{Response, StatusCode};

use super::error::RestError;

pub const CONTENT_TYPE_APPLICATION_JSON: &str = "application/json";

/// Wrap an already serialized JSON body in a 200 response.
///
/// The body moves into the response; if building fails it is dropped with the
/// builder and nothing is leaked.
pub fn json_response(
    body: Bytes,
    allow_any_origin: bool,
) -> Result<Response<Full<Bytes>>, RestError> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, CONTENT_TYPE_APPLICATION_JSON);

    if allow_any_origin {
        builder = builder.header(ACCESS_CONTROL_ALLOW_ORIGIN, "*");
    }

    Ok(builder.body(Full::new(body))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_response_headers() {
        let resp = json_response(Bytes::from_static(b"[]"), false).unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
        assert!(resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[test]
    fn test_json_response_any_origin() {
        let resp = json_response(Bytes::from_static(b"[]"), true).unwrap();
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
