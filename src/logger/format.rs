//! Access log format module
//!
//! - `common` (Common Log Format)
//! - `json` (one JSON object per line)
//! - anything else is a pattern with `$variable` substitution

use chrono::{DateTime, Local};
use serde::Serialize;

const CLF_TIME: &str = "%d/%b/%Y:%H:%M:%S %z";

/// One served request
#[derive(Debug, Clone, Serialize)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    #[serde(serialize_with = "serialize_rfc3339")]
    pub time: DateTime<Local>,
    pub method: String,
    /// Request target as received, including any query string
    pub uri: String,
    pub status: u16,
    pub body_bytes: usize,
    pub request_time_us: u64,
}

fn serialize_rfc3339<S: serde::Serializer>(
    time: &DateTime<Local>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.to_rfc3339())
}

impl AccessLogEntry {
    /// Create an entry stamped with the current local time
    pub fn new(remote_addr: String, method: String, uri: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            uri,
            status: 200,
            body_bytes: 0,
            request_time_us: 0,
        }
    }

    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            pattern => self.format_pattern(pattern),
        }
    }

    /// `$remote_addr - - [$time_local] "$request_method $request_uri HTTP/1.1" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/1.1\" {} {}",
            self.remote_addr,
            self.time.format(CLF_TIME),
            self.method,
            self.uri,
            self.status,
            self.body_bytes,
        )
    }

    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!(r#"{{"error":"{e}"}}"#))
    }

    /// Supported variables: `$remote_addr`, `$time_local`, `$request_method`,
    /// `$request_uri`, `$status`, `$body_bytes_sent`, `$request_time` (seconds)
    fn format_pattern(&self, pattern: &str) -> String {
        #[allow(clippy::cast_precision_loss)]
        let request_time = self.request_time_us as f64 / 1_000_000.0;

        pattern
            .replace("$remote_addr", &self.remote_addr)
            .replace("$time_local", &self.time.format(CLF_TIME).to_string())
            .replace("$request_method", &self.method)
            .replace("$request_uri", &self.uri)
            .replace("$request_time", &format!("{request_time:.3}"))
            .replace("$status", &self.status.to_string())
            .replace("$body_bytes_sent", &self.body_bytes.to_string())
    }
}
