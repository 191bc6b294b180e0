use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, Field, Lit, parse_macro_input};

use crate::support::attrs::{self, AttrArgs, AttrItem};
use crate::support::case::RenameRule;
use crate::support::{diag, utils};

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(ts) => ts.into(),
        Err(e) => diag::to_compile_error(e),
    }
}

/// What the derive reads from one field's attributes.
#[derive(Debug, Default, PartialEq)]
struct FieldAttrs {
    skip: bool,
    validate: Option<String>,
    rename: Option<String>,
}

impl FieldAttrs {
    fn parse(field: &Field) -> syn::Result<Self> {
        let mut out = Self::default();
        let mut tags = Vec::new();

        for item in attrs::parse_attrs(&field.attrs, "validate")?.items {
            match item {
                AttrItem::Lit(Lit::Str(tag)) => tags.push(tag.value()),
                AttrItem::Flag(flag) if flag == "skip" => out.skip = true,
                AttrItem::Lit(other) => {
                    return Err(diag::error_spanned(&other, "expected a constraint tag string"));
                }
                AttrItem::Flag(key) | AttrItem::KeyValue { key, .. } | AttrItem::List { key, .. } => {
                    return Err(diag::error_spanned(
                        &key,
                        format!("unknown validate option `{key}`, expected a tag string or `skip`"),
                    ));
                }
            }
        }

        if !tags.is_empty() {
            out.validate = Some(tags.join(","));
        }

        let serde = attrs::parse_foreign_attrs(&field.attrs, "serde");
        out.rename = serialize_name(&serde, "rename");

        Ok(out)
    }
}

/// `key = "..."` or the serialize side of `key(serialize = "...")`.
fn serialize_name(serde: &AttrArgs, key: &str) -> Option<String> {
    serde
        .get_string(key)
        .or_else(|| serde.get_list(key).and_then(|list| list.get_string("serialize")))
}

/// The container's `#[serde(rename_all = "...")]` rule, if any.
fn rename_all(input: &DeriveInput) -> syn::Result<Option<RenameRule>> {
    let serde = attrs::parse_foreign_attrs(&input.attrs, "serde");
    let Some(name) = serialize_name(&serde, "rename_all") else {
        return Ok(None);
    };

    RenameRule::from_name(&name).map(Some).ok_or_else(|| {
        diag::error_spanned(
            &input.ident,
            format!("unknown serde rename_all rule `{name}`"),
        )
    })
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    utils::require_no_generics(input)?;
    let fields = utils::require_named_fields(input)?;
    let rule = rename_all(input)?;

    let struct_ident = &input.ident;
    let struct_name = struct_ident.unraw().to_string();

    let mut field_defs = Vec::new();
    let mut field_arms = Vec::new();

    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let field_attrs = FieldAttrs::parse(field)?;
        if field_attrs.skip {
            continue;
        }

        let field_name = field_ident.unraw().to_string();
        let ty = &field.ty;
        let validate = field_attrs.validate.map(|tag| quote!(.validate(#tag)));
        let alias = field_attrs
            .rename
            .or_else(|| rule.map(|rule| rule.apply(&field_name)));
        let serial = alias.map(|alias| quote!(.serial(#alias)));

        field_defs.push(quote! {
            ::sift_validator::FieldDef::new(
                #field_name,
                <#ty as ::sift_validator::Reflect>::kind(),
            )
            #validate
            #serial
        });
        field_arms.push(quote! {
            #field_name => ::core::option::Option::Some(
                ::sift_validator::Reflect::reflect(&self.#field_ident),
            ),
        });
    }

    Ok(quote! {
        impl ::sift_validator::Structure for #struct_ident {
            fn structure() -> ::sift_validator::StructType {
                ::sift_validator::StructType::new::<Self>(#struct_name)
                    #(.field(#field_defs))*
            }

            fn field(&self, name: &str) -> ::core::option::Option<::sift_validator::FieldValue<'_>> {
                match name {
                    #(#field_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }

        impl ::sift_validator::Reflect for #struct_ident {
            fn kind() -> ::sift_validator::Kind {
                ::sift_validator::Kind::structure::<Self>()
            }

            fn reflect(&self) -> ::sift_validator::FieldValue<'_> {
                ::sift_validator::FieldValue::Struct(self)
            }
        }
    })
}
