use hyper::http::uri::InvalidUri;
use thiserror::Error;

/// Why a request was not answered by the REST API.
///
/// Every variant surfaces to the server as "not handled"; the distinction only
/// drives logging.
#[derive(Debug, Error)]
pub enum RestError {
    #[error("request has no URI")]
    MissingUri,
    #[error("malformed request URI: {0}")]
    MalformedUri(#[from] InvalidUri),
    #[error("no API route for path '{0}'")]
    NoRouteMatch(String),
    #[error("failed to serialize response body: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to build response: {0}")]
    ResponseConstruction(#[from] hyper::http::Error),
}

impl RestError {
    /// Failures that indicate a server-side fault rather than a foreign request
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Serialization(_) | Self::ResponseConstruction(_))
    }
}
