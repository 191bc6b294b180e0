//! Shaping errors into JSON response bodies.

use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::{ApiError, CodeError};

/// The JSON body sent for an error response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    /// Machine-readable code.
    pub code: String,
    /// Human message; empty when the error is masked.
    pub message: String,
    /// Structured payload; `null` when absent or masked.
    pub detail: Value,
}

/// Status plus body, ready to be written by whatever transport is in use.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    /// HTTP status of the response.
    pub status: StatusCode,
    /// JSON body of the response.
    pub body: ErrorBody,
}

impl ErrorResponse {
    /// Builds the response for an error implementing the API contract.
    ///
    /// Masked errors keep their code and status but lose message and detail.
    /// The full error is logged instead so it is not lost.
    pub fn from_api_error<E>(err: &E) -> Self
    where
        E: ApiError + ?Sized,
    {
        let mut body = ErrorBody {
            code: err.code().to_owned(),
            message: err.message(),
            detail: err.detail(),
        };

        if err.is_masked() {
            tracing::error!(
                code = %body.code,
                status = err.status().as_u16(),
                error = %body.message,
                "masked error response"
            );
            body.message = String::new();
            body.detail = Value::Null;
        }

        Self {
            status: err.status(),
            body,
        }
    }

    /// Builds the response for an arbitrary error through the generic fallback.
    pub fn from_error<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::from_api_error(&CodeError::generic().wrap(err))
    }

    /// Serializes the body as JSON.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.body)
    }
}

impl<E: ApiError> From<&E> for ErrorResponse {
    fn from(err: &E) -> Self {
        Self::from_api_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn api_error_fields_are_copied() {
        let err = CodeError::new("conflict", "already exists", StatusCode::CONFLICT)
            .with_detail(json!({ "id": 3 }));
        let response = ErrorResponse::from_api_error(&err);

        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(
            response.body,
            ErrorBody {
                code: "conflict".into(),
                message: "already exists".into(),
                detail: json!({ "id": 3 }),
            }
        );
    }

    #[test]
    fn plain_errors_fall_back_to_generic() {
        let io = std::io::Error::other("disk on fire");
        let response = ErrorResponse::from_error(io);

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body.code, "generic");
        assert_eq!(response.body.message, "generic error: disk on fire");
        assert_eq!(response.body.detail, Value::Null);
    }

    #[test]
    fn masked_errors_hide_message_and_detail() {
        let err = CodeError::new("db", "password rejected for user admin", StatusCode::BAD_GATEWAY)
            .with_detail(json!({ "host": "10.0.0.1" }))
            .masked();
        let response = ErrorResponse::from_api_error(&err);

        assert_eq!(response.status, StatusCode::BAD_GATEWAY);
        assert_eq!(response.body.code, "db");
        assert_eq!(response.body.message, "");
        assert_eq!(response.body.detail, Value::Null);
    }

    #[test]
    fn body_serializes_all_keys() {
        let response = ErrorResponse::from_api_error(&CodeError::generic());
        let value: Value = serde_json::from_slice(&response.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({ "code": "generic", "message": "generic error", "detail": null })
        );
    }
}
