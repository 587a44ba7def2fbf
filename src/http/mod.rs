//! HTTP protocol layer module
//!
//! Server-level responses, decoupled from the API handlers.

pub mod response;

pub use response::build_404_response;
