use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Field, Fields};

/// Ensure input is a struct and return its fields.
pub fn require_struct_fields(input: &DeriveInput) -> syn::Result<&Fields> {
    match &input.data {
        Data::Struct(s) => Ok(&s.fields),
        _ => Err(syn::Error::new(
            input.ident.span(),
            "This derive can only be used on structs",
        )),
    }
}

/// Return the named fields of a struct; unit structs have none.
pub fn require_named_fields(input: &DeriveInput) -> syn::Result<Vec<&Field>> {
    let fields = require_struct_fields(input)?;
    match fields {
        Fields::Named(n) => Ok(n.named.iter().collect()),
        Fields::Unit => Ok(Vec::new()),
        Fields::Unnamed(_) => Err(syn::Error::new_spanned(
            fields,
            "This derive requires a struct with named fields (e.g. `struct X { ... }`)",
        )),
    }
}

/// Reject type, lifetime and const parameters.
///
/// Descriptions are keyed by `TypeId`, which needs a single `'static` type.
pub fn require_no_generics(input: &DeriveInput) -> syn::Result<()> {
    match input.generics.params.first() {
        None => Ok(()),
        Some(param) => Err(syn::Error::new(
            param.span(),
            "This derive does not support generic structs",
        )),
    }
}
