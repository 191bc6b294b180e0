//! The error-with-code contract consumed by the HTTP layer.

use http::StatusCode;
use serde_json::Value;

/// An error that can be rendered to an API client.
///
/// The response writer only ever talks to errors through this trait, so a
/// validation failure, a lookup miss and a wrapped I/O error all serialize the
/// same way.
pub trait ApiError: std::error::Error + Send + Sync {
    /// Stable machine-readable code, e.g. `invalid_entity`.
    fn code(&self) -> &str;

    /// HTTP status the response should carry.
    fn status(&self) -> StatusCode;

    /// Human-readable message. Defaults to the `Display` output.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Optional structured payload. `Value::Null` when there is none.
    fn detail(&self) -> Value {
        Value::Null
    }

    /// Whether message and detail must be hidden from the client.
    fn is_masked(&self) -> bool {
        false
    }
}
