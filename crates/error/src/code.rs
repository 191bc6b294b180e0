//! A concrete [`ApiError`] built from a code, a message and a status.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use http::StatusCode;
use serde_json::Value;

use crate::ApiError;

type Source = Arc<dyn std::error::Error + Send + Sync>;

/// An error with a unique code, an HTTP status and optional detail data.
///
/// Values are cheap to clone, so a service usually declares its errors once
/// and derives request-specific copies with [`wrap`](Self::wrap) and
/// [`with_detail`](Self::with_detail).
///
/// # Examples
///
/// ```rust,ignore
/// let conflict = CodeError::new("conflict", "resource already exists", StatusCode::CONFLICT);
/// let err = conflict.wrap(io_error).with_detail(json!({ "id": 7 }));
/// assert!(err.is(&conflict));
/// ```
#[derive(Clone)]
pub struct CodeError {
    code: Cow<'static, str>,
    message: String,
    status: StatusCode,
    detail: Value,
    masked: bool,
    source: Option<Source>,
}

impl CodeError {
    /// Creates a new error with the given code, message and status.
    pub fn new(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            status,
            detail: Value::Null,
            masked: false,
            source: None,
        }
    }

    /// The fallback used for errors that do not implement [`ApiError`].
    #[must_use]
    pub fn generic() -> Self {
        Self::new("generic", "generic error", StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Returns a copy that wraps `err`.
    ///
    /// The message becomes `"<message>: <err>"`; code, status and detail are kept.
    #[must_use = "wrap returns a new error"]
    pub fn wrap<E>(&self, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            code: self.code.clone(),
            message: format!("{}: {}", self.message, err),
            status: self.status,
            detail: self.detail.clone(),
            masked: self.masked,
            source: Some(Arc::new(err)),
        }
    }

    /// Returns a copy carrying the given detail payload.
    #[must_use = "with_detail returns a new error"]
    pub fn with_detail(&self, detail: impl Into<Value>) -> Self {
        Self {
            detail: detail.into(),
            ..self.clone()
        }
    }

    /// Returns a copy whose message and detail are hidden from clients.
    #[must_use = "masked returns a new error"]
    pub fn masked(&self) -> Self {
        Self {
            masked: true,
            ..self.clone()
        }
    }

    /// Reports whether both errors share the same code.
    pub fn is(&self, other: &CodeError) -> bool {
        self.code == other.code
    }
}

impl fmt::Debug for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeError")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("status", &self.status)
            .field("detail", &self.detail)
            .field("masked", &self.masked)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

impl ApiError for CodeError {
    fn code(&self) -> &str {
        &self.code
    }

    fn status(&self) -> StatusCode {
        self.status
    }

    fn detail(&self) -> Value {
        self.detail.clone()
    }

    fn is_masked(&self) -> bool {
        self.masked
    }
}
