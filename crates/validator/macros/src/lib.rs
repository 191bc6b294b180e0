//! # sift-validator-macros
//!
//! Derive macro for `sift-validator`.
//!
//! ## Derive Macros
//!
//! | Macro | Description |
//! |-------|-------------|
//! | [`Structure`](derive@Structure) | Describes a struct's fields and constraint tags |
//!
//! Use it through the re-export in `sift_validator`; the generated code
//! refers to `::sift_validator` paths.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate proc_macro;

use proc_macro::TokenStream;

mod structure;
mod support;

/// Derive macro for the `Structure` and `Reflect` traits.
///
/// Every field type must implement `Reflect`. Nested structs that derive
/// `Structure` are validated recursively.
///
/// # Attributes
///
/// ## Field attributes
///
/// - `#[validate("...")]` - Constraint tag, e.g. `"required,between:1:64"`.
///   Several attributes are joined with `,` in order.
/// - `#[validate(skip)]` - Leaves the field out of the description, for
///   types that do not implement `Reflect`.
/// - `#[serde(rename = "...")]` or `#[serde(rename(serialize = "..."))]` -
///   Name used for the field in validation results. Other `serde` items are
///   ignored.
///
/// ## Container attributes
///
/// - `#[serde(rename_all = "...")]` or `#[serde(rename_all(serialize = "..."))]` -
///   Serde case rule (`camelCase`, `kebab-case`, ...) applied to fields
///   without their own `rename`.
///
/// # Example
///
/// ```ignore
/// #[derive(Structure, Serialize)]
/// pub struct Signup {
///     #[validate("required,between:3:32")]
///     #[serde(rename = "user_name")]
///     name: String,
///
///     #[validate("between:13:130")]
///     age: u8,
///
///     address: Address,
///
///     #[validate(skip)]
///     session: Session,
/// }
/// ```
#[proc_macro_derive(Structure, attributes(validate, serde))]
pub fn derive_structure(input: TokenStream) -> TokenStream {
    structure::derive(input)
}
