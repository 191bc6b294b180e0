//! Prelude module for convenient imports.
//!
//! Provides a single `use sift_validator::prelude::*;` import that brings in
//! the traits and types needed to describe, build and run validators.
//!
//! # Examples
//!
//! ```rust,ignore
//! use sift_validator::prelude::*;
//!
//! let validator = StructValidator::new::<Signup>()?;
//! if let Err(ValidateError::Invalid(result)) = validator.validate(&signup) {
//!     return Err(ErrorResponse::from_api_error(&result));
//! }
//! ```

// ============================================================================
// DESCRIPTION: Reflection and struct descriptions
// ============================================================================

// `Structure` also brings the derive macro when the `derive` feature is on.
pub use crate::{FieldDef, FieldValue, Kind, Reflect, StructType, Structure};

// ============================================================================
// ENGINE: Registry, builder, validator
// ============================================================================

pub use crate::{
    Assertion, AssertionOutcome, ConstraintArgs, Registry, RegistryConfig, StructValidator,
};

// ============================================================================
// RESULTS: Errors and the API contract
// ============================================================================

pub use crate::{BuildError, ResolveError, ValidateError, ValidationResult, Violation, ViolationRecord};
pub use sift_error::{ApiError, ErrorResponse};
