//! # sift-error
//!
//! The error contract shared between the validation engine and whatever
//! writes HTTP responses.
//!
//! Anything implementing [`ApiError`] carries a stable machine code, an HTTP
//! status, a human message and an optional JSON detail payload.
//! [`ErrorResponse`] turns such an error into the body a JSON API sends back,
//! falling back to the generic error for everything else.
//!
//! ```rust,ignore
//! use sift_error::{CodeError, ErrorResponse};
//! use http::StatusCode;
//!
//! let not_found = CodeError::new("not_found", "resource not found", StatusCode::NOT_FOUND);
//! let response = ErrorResponse::from_api_error(&not_found);
//! assert_eq!(response.status, StatusCode::NOT_FOUND);
//! ```

mod api;
mod code;
mod map;
mod response;

pub use api::ApiError;
pub use code::CodeError;
pub use map::ErrorMap;
pub use response::{ErrorBody, ErrorResponse};

/// Re-exported so implementors of [`ApiError`] name the same status type.
pub use http::StatusCode;
