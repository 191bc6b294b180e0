//! Single-value constraint checks.
//!
//! An [`Assertion`] is built once by a registry constructor, with all of its
//! parameters already parsed for the field's [`Kind`](crate::Kind), and then
//! checked against many values.

mod between;
mod required;

use std::fmt;

pub use between::Between;
pub use required::Required;

use crate::reflect::FieldValue;
use crate::result::{ValidationResult, Violation};

// ============================================================================
// ASSERTION TRAIT
// ============================================================================

/// A constraint bound to its parameters.
///
/// # Examples
///
/// ```rust,ignore
/// #[derive(Debug)]
/// struct NotBlank;
///
/// impl Assertion for NotBlank {
///     fn check(&self, value: &FieldValue<'_>) -> AssertionOutcome {
///         match value {
///             FieldValue::Text(text) if text.trim().is_empty() => AssertionOutcome::violation(
///                 ViolationRecord::new("not_blank", "the value is blank", "the value is blank"),
///             ),
///             _ => AssertionOutcome::Pass,
///         }
///     }
/// }
/// ```
pub trait Assertion: Send + Sync + fmt::Debug {
    /// Checks one value.
    fn check(&self, value: &FieldValue<'_>) -> AssertionOutcome;
}

/// What a single [`Assertion::check`] found.
#[derive(Debug, Clone)]
pub enum AssertionOutcome {
    /// The value satisfies the constraint.
    Pass,
    /// The value violates the constraint.
    Violation(Violation),
    /// A nested validator found violations; paths are relative to the field.
    Nested(ValidationResult),
}

impl AssertionOutcome {
    /// Wraps anything convertible into a [`Violation`].
    pub fn violation(violation: impl Into<Violation>) -> Self {
        Self::Violation(violation.into())
    }

    /// Wraps an arbitrary error as an opaque violation.
    pub fn opaque<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Violation(Violation::opaque(err))
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

// ============================================================================
// CLOSURE ASSERTIONS
// ============================================================================

/// Creates an assertion from a closure.
///
/// Handy for constructors registered at runtime:
///
/// ```rust,ignore
/// registry.register("even", |args| {
///     Ok(Box::new(assertion::from_fn("even", |value| match value {
///         FieldValue::Int(n) if n % 2 != 0 => AssertionOutcome::violation(/* ... */),
///         _ => AssertionOutcome::Pass,
///     })))
/// });
/// ```
pub fn from_fn<F>(name: &'static str, check: F) -> FnAssertion<F>
where
    F: Fn(&FieldValue<'_>) -> AssertionOutcome + Send + Sync,
{
    FnAssertion { name, check }
}

/// Assertion returned by [`from_fn`].
pub struct FnAssertion<F> {
    name: &'static str,
    check: F,
}

impl<F> fmt::Debug for FnAssertion<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAssertion")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> Assertion for FnAssertion<F>
where
    F: Fn(&FieldValue<'_>) -> AssertionOutcome + Send + Sync,
{
    fn check(&self, value: &FieldValue<'_>) -> AssertionOutcome {
        (self.check)(value)
    }
}
