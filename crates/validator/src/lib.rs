//! # sift-validator
//!
//! Tag-driven validation for plain Rust structs.
//!
//! A struct describes its fields once (usually through `#[derive(Structure)]`),
//! each field optionally carrying a constraint tag such as
//! `"required,between:1:64"`. A [`StructValidator`] is built from that
//! description a single time: tags are parsed, constraint names are resolved
//! against a [`Registry`] and nested structs get validators of their own.
//! The built validator is immutable and can be shared across threads.
//!
//! Validation never stops at the first problem. Every failing field ends up in
//! one [`ValidationResult`], keyed by the dotted alias path of the field, which
//! plugs straight into the [`sift_error::ApiError`] contract (`invalid_entity`,
//! 422).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sift_validator::prelude::*;
//!
//! #[derive(Structure)]
//! struct Signup {
//!     #[validate("required,between:3:32")]
//!     #[serde(rename = "user_name")]
//!     name: String,
//!     #[validate("between:13:130")]
//!     age: u8,
//! }
//!
//! let validator = StructValidator::new::<Signup>()?;
//! let err = validator.validate(&Signup { name: String::new(), age: 9 }).unwrap_err();
//! let result = err.as_result().unwrap();
//! assert_eq!(result.codes("user_name"), ["required", "between"]);
//! assert_eq!(result.codes("age"), ["between"]);
//! ```
//!
//! ## Built-in constraints
//!
//! - `required`: optional values must be `Some`; text, sequences and maps
//!   must be non-empty; everything else is always present.
//! - `between:<lower>:<upper>`: inclusive range for numbers, inclusive length
//!   range for text, sequences, arrays and maps.
//!
//! More constraints can be added with [`Registry::register`].

// Lets the derive macro's `::sift_validator` paths resolve inside this crate's own tests.
extern crate self as sift_validator;

pub mod assertion;
mod builder;
mod config;
mod error;
mod kind;
pub mod prelude;
mod reflect;
mod registry;
mod result;
mod structure;
mod validator;

pub use assertion::{Assertion, AssertionOutcome};
pub use builder::{ConstraintSpec, SpecBuilder, parse_tag};
pub use config::{LengthMode, RegistryConfig};
pub use error::{BuildError, MissingField, ResolveError, TypeMismatch, ValidateError, ValueMismatch};
pub use kind::{FloatWidth, IntWidth, Kind, StructRef, UintWidth};
pub use reflect::{FieldValue, Reflect, Structure};
pub use registry::{ConstraintArgs, Constructor, Registry};
pub use result::{ValidationResult, Violation, ViolationRecord};
pub use structure::{FieldDef, StructType};
pub use validator::{FieldSpec, StructValidator};

#[cfg(feature = "derive")]
pub use sift_validator_macros::Structure;
