//! `/api/streamers` - read-only projection of the configured re-streamers

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::error::RestError;
use super::response::json_response;
use crate::config::{Config, ReStreamer};

const JSON_INDENT: &[u8] = b"    ";

/// Public view of one re-streamer. Field order is the JSON key order.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StreamerSummary<'a> {
    pub id: &'a str,
    pub source: &'a str,
    pub description: &'a str,
    /// Whether a key is configured; the key itself is never exposed
    pub key: bool,
    pub enabled: bool,
}

impl<'a> From<(&'a str, &'a ReStreamer)> for StreamerSummary<'a> {
    fn from((id, restreamer): (&'a str, &'a ReStreamer)) -> Self {
        Self {
            id,
            source: &restreamer.source,
            description: &restreamer.description,
            key: !restreamer.key.is_empty(),
            enabled: restreamer.enabled,
        }
    }
}

/// Serialize every configured re-streamer, in snapshot order
pub fn build_streamers_body(snapshot: &Config) -> Result<Bytes, RestError> {
    let summaries: Vec<StreamerSummary<'_>> = snapshot
        .restreamers
        .iter()
        .map(|(id, restreamer)| StreamerSummary::from((id.as_str(), restreamer)))
        .collect();

    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    summaries.serialize(&mut ser)?;

    Ok(Bytes::from(buf))
}

/// Handle a request routed below `/api/streamers`.
///
/// `_sub_path` and `_method` are not used yet; every request gets the full list.
pub fn handle_streamers_request(
    snapshot: &Config,
    _method: &Method,
    _sub_path: &str,
) -> Result<Response<Full<Bytes>>, RestError> {
    let body = build_streamers_body(snapshot)?;
    json_response(body, snapshot.http.allow_any_origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restreamer(source: &str, description: &str, key: &str, enabled: bool) -> ReStreamer {
        ReStreamer {
            source: source.to_string(),
            description: description.to_string(),
            key: key.to_string(),
            enabled,
        }
    }

    fn body_string(snapshot: &Config) -> String {
        String::from_utf8(build_streamers_body(snapshot).unwrap().to_vec()).unwrap()
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Config::with_restreamers([]);
        assert_eq!(body_string(&snapshot), "[]");
    }

    #[test]
    fn test_single_streamer_golden() {
        let snapshot =
            Config::with_restreamers([("cam1", restreamer("rtsp://x", "Front", "secret", true))]);
        let expected = "[\n    {\n        \"id\": \"cam1\",\n        \"source\": \"rtsp://x\",\n        \"description\": \"Front\",\n        \"key\": true,\n        \"enabled\": true\n    }\n]";
        assert_eq!(body_string(&snapshot), expected);
    }

    #[test]
    fn test_key_is_redacted() {
        let snapshot = Config::with_restreamers([
            ("with-key", restreamer("rtsp://a", "A", "s3cr3t-value", true)),
            ("without-key", restreamer("rtsp://b", "B", "", false)),
        ]);
        let body = body_string(&snapshot);
        assert!(!body.contains("s3cr3t-value"));

        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed[0]["id"], "with-key");
        assert_eq!(parsed[0]["key"], true);
        assert_eq!(parsed[1]["id"], "without-key");
        assert_eq!(parsed[1]["key"], false);
    }

    #[test]
    fn test_fields_copied_verbatim() {
        let snapshot = Config::with_restreamers([(
            "hall",
            restreamer("rtmp://origin/live/\"quoted\"", "Salle d'entrée", "", false),
        )]);
        let parsed: serde_json::Value = serde_json::from_str(&body_string(&snapshot)).unwrap();
        let entry = &parsed[0];
        assert_eq!(entry["id"], "hall");
        assert_eq!(entry["source"], "rtmp://origin/live/\"quoted\"");
        assert_eq!(entry["description"], "Salle d'entrée");
        assert_eq!(entry["enabled"], false);
        assert_eq!(entry.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_key_order_is_fixed() {
        let snapshot = Config::with_restreamers([("c", restreamer("s", "d", "k", true))]);
        let body = body_string(&snapshot);
        let keys = ["\"id\"", "\"source\"", "\"description\"", "\"key\"", "\"enabled\""];
        let positions: Vec<usize> = keys.iter().map(|k| body.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_repeated_builds_are_identical() {
        let snapshot = Config::with_restreamers([
            ("b", restreamer("rtsp://b", "", "", true)),
            ("a", restreamer("rtsp://a", "", "x", false)),
        ]);
        assert_eq!(
            build_streamers_body(&snapshot).unwrap(),
            build_streamers_body(&snapshot).unwrap()
        );
    }

    #[test]
    fn test_summary_from_record() {
        let record = restreamer("rtsp://x", "Front", "secret", true);
        let summary = StreamerSummary::from(("cam1", &record));
        assert_eq!(
            summary,
            StreamerSummary {
                id: "cam1",
                source: "rtsp://x",
                description: "Front",
                key: true,
                enabled: true,
            }
        );
    }
}
