//! Build-time and run-time errors.

use std::borrow::Cow;

use serde_json::Value;
use sift_error::{ApiError, StatusCode};
use thiserror::Error;

use crate::result::ValidationResult;

/// A constraint could not be turned into an assertion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No constructor is registered under this name.
    #[error("unknown constraint `{name}`")]
    UnknownConstraint { name: String },

    /// The argument string could not be parsed.
    #[error("malformed arguments `{args}` for `{constraint}`: {reason}")]
    MalformedArguments {
        constraint: String,
        args: String,
        reason: Cow<'static, str>,
    },

    /// The constraint does not apply to the field's kind.
    #[error("constraint `{constraint}` does not support {kind} fields")]
    UnsupportedKind { constraint: String, kind: String },
}

impl ResolveError {
    /// Creates an [`ResolveError::UnknownConstraint`].
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownConstraint { name: name.into() }
    }

    /// Creates an [`ResolveError::MalformedArguments`].
    pub fn malformed(
        constraint: impl Into<String>,
        args: impl Into<String>,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::MalformedArguments {
            constraint: constraint.into(),
            args: args.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`ResolveError::UnsupportedKind`].
    pub fn unsupported(constraint: impl Into<String>, kind: impl ToString) -> Self {
        Self::UnsupportedKind {
            constraint: constraint.into(),
            kind: kind.to_string(),
        }
    }
}

/// Building a validator failed on one field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot build validator for `{type_name}`, field `{field}`: {source}")]
pub struct BuildError {
    pub type_name: &'static str,
    pub field: String,
    #[source]
    pub source: ResolveError,
}

impl BuildError {
    pub(crate) fn new(type_name: &'static str, field: impl Into<String>, source: ResolveError) -> Self {
        Self {
            type_name,
            field: field.into(),
            source,
        }
    }

    /// The underlying resolution error.
    pub fn resolve_error(&self) -> &ResolveError {
        &self.source
    }

    pub fn is_unknown_constraint(&self) -> bool {
        matches!(self.source, ResolveError::UnknownConstraint { .. })
    }

    pub fn is_malformed_arguments(&self) -> bool {
        matches!(self.source, ResolveError::MalformedArguments { .. })
    }

    pub fn is_unsupported_kind(&self) -> bool {
        matches!(self.source, ResolveError::UnsupportedKind { .. })
    }
}

/// A validator was handed a value of another type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validator for `{expected}` cannot validate `{found}`")]
pub struct TypeMismatch {
    pub expected: &'static str,
    pub found: &'static str,
}

/// An assertion received a value of a shape it was not built for.
///
/// Only reachable through hand-written [`Structure`](crate::Structure) impls
/// that disagree with their own description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{constraint}` cannot check a {found} value")]
pub struct ValueMismatch {
    pub constraint: &'static str,
    pub found: &'static str,
}

/// A description names a field that the value does not expose.
///
/// Only reachable through hand-written [`Structure`](crate::Structure) impls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{type_name}` does not expose field `{field}`")]
pub struct MissingField {
    pub type_name: &'static str,
    pub field: String,
}

/// Validation did not succeed.
#[derive(Debug, Clone, Error)]
pub enum ValidateError {
    /// The value is not of the validator's type.
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),

    /// The value has one or more violations.
    #[error(transparent)]
    Invalid(#[from] ValidationResult),
}

impl ValidateError {
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// The violations, if the value was of the right type.
    pub fn as_result(&self) -> Option<&ValidationResult> {
        match self {
            Self::Invalid(result) => Some(result),
            Self::TypeMismatch(_) => None,
        }
    }

    /// Consumes the error and returns the violations, if any.
    pub fn into_result(self) -> Option<ValidationResult> {
        match self {
            Self::Invalid(result) => Some(result),
            Self::TypeMismatch(_) => None,
        }
    }
}

// A type mismatch is a programming error, so it surfaces as the generic 500.
impl ApiError for ValidateError {
    fn code(&self) -> &str {
        match self {
            Self::Invalid(result) => ApiError::code(result),
            Self::TypeMismatch(_) => "generic",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Invalid(result) => result.status(),
            Self::TypeMismatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> Value {
        match self {
            Self::Invalid(result) => result.detail(),
            Self::TypeMismatch(_) => Value::Null,
        }
    }
}
