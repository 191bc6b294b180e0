use syn::{
    Attribute, Ident, Lit, Meta, Result, Token,
    ext::IdentExt,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

use crate::support::diag;

/// Parsed attribute arguments container.
#[derive(Debug, Clone, Default)]
pub struct AttrArgs {
    pub items: Vec<AttrItem>,
}

/// A single attribute item.
#[derive(Debug, Clone)]
pub enum AttrItem {
    /// A flag like `skip`
    Flag(Ident),
    /// A bare literal like `"required,between:1:3"`
    Lit(Lit),
    /// Key-value pair like `rename = "value"`
    KeyValue { key: Ident, value: AttrValue },
    /// Nested list like `rename(serialize = "a", deserialize = "b")`
    List { key: Ident, args: AttrArgs },
}

/// Value of a key-value pair.
#[derive(Debug, Clone)]
pub enum AttrValue {
    Lit(Lit),
    /// Any non-literal expression, e.g. serde's `with = path::to::module`.
    Tokens,
}

impl AttrArgs {
    /// Find a key-value pair by key name.
    pub fn get_value(&self, key: &str) -> Option<&AttrValue> {
        self.items.iter().find_map(|item| match item {
            AttrItem::KeyValue { key: k, value } if k == key => Some(value),
            _ => None,
        })
    }

    /// Get a string value by key.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_value(key).and_then(|value| match value {
            AttrValue::Lit(Lit::Str(s)) => Some(s.value()),
            _ => None,
        })
    }

    /// Get the arguments of a nested list by key.
    pub fn get_list(&self, key: &str) -> Option<&AttrArgs> {
        self.items.iter().find_map(|item| match item {
            AttrItem::List { key: k, args } if k == key => Some(args),
            _ => None,
        })
    }
}

/// Parse attribute like `#[validate(...)]` (the whole Attribute, not only args).
pub fn parse_attr(attr: &Attribute, expected: &str) -> Result<Option<AttrArgs>> {
    if !attr.path().is_ident(expected) {
        return Ok(None);
    }

    match &attr.meta {
        Meta::Path(_) => Ok(Some(AttrArgs::default())),
        Meta::List(list) => {
            let args = syn::parse2::<AttrArgsParser>(list.tokens.clone())?;
            Ok(Some(args.0))
        }
        Meta::NameValue(nv) => Err(diag::error_spanned(
            nv,
            format!("#[{expected}] must be #[{expected}(...)] or #[{expected}] (not name-value)"),
        )),
    }
}

/// Parse all attributes of a given type and merge them.
pub fn parse_attrs(attrs: &[Attribute], name: &str) -> Result<AttrArgs> {
    let mut result = AttrArgs::default();

    for attr in attrs {
        if let Some(args) = parse_attr(attr, name)? {
            result.items.extend(args.items);
        }
    }

    Ok(result)
}

/// Like [`parse_attrs`], but skips attributes that do not parse.
///
/// Used for attributes owned by other derives, which may carry syntax this
/// crate does not care about.
pub fn parse_foreign_attrs(attrs: &[Attribute], name: &str) -> AttrArgs {
    let mut result = AttrArgs::default();

    for attr in attrs {
        if let Ok(Some(args)) = parse_attr(attr, name) {
            result.items.extend(args.items);
        }
    }

    result
}

struct AttrArgsParser(AttrArgs);

impl Parse for AttrArgsParser {
    fn parse(input: ParseStream) -> Result<Self> {
        let items = if input.is_empty() {
            vec![]
        } else {
            Punctuated::<AttrItemParser, Token![,]>::parse_terminated(input)?
                .into_iter()
                .map(|x| x.0)
                .collect()
        };
        Ok(Self(AttrArgs { items }))
    }
}

struct AttrItemParser(AttrItem);

impl Parse for AttrItemParser {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(Lit) {
            return Ok(Self(AttrItem::Lit(input.parse()?)));
        }

        // `Ident::parse_any` accepts keywords such as serde's `crate = "..."`.
        let key = Ident::parse_any(input)?;

        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;

            let value = if input.peek(Lit) {
                AttrValue::Lit(input.parse()?)
            } else {
                input.parse::<syn::Expr>()?;
                AttrValue::Tokens
            };
            return Ok(Self(AttrItem::KeyValue { key, value }));
        }

        if input.peek(syn::token::Paren) {
            let content;
            syn::parenthesized!(content in input);
            let args = content.parse::<AttrArgsParser>()?.0;
            return Ok(Self(AttrItem::List { key, args }));
        }

        Ok(Self(AttrItem::Flag(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn has_flag(args: &AttrArgs, flag: &str) -> bool {
        args.items
            .iter()
            .any(|item| matches!(item, AttrItem::Flag(f) if f == flag))
    }

    #[test]
    fn test_parse_tag_literal() {
        let tokens = quote!("required,between:1:3");
        let parsed: AttrArgsParser = syn::parse2(tokens).unwrap();

        assert_eq!(parsed.0.items.len(), 1);
        assert!(matches!(&parsed.0.items[0], AttrItem::Lit(Lit::Str(s)) if s.value() == "required,between:1:3"));
    }

    #[test]
    fn test_parse_flag_and_key_value() {
        let tokens = quote!(rename = "user_name", skip);
        let parsed: AttrArgsParser = syn::parse2(tokens).unwrap();

        assert_eq!(parsed.0.get_string("rename").as_deref(), Some("user_name"));
        assert!(has_flag(&parsed.0, "skip"));
    }

    #[test]
    fn test_parse_nested_list() {
        let tokens = quote!(rename(serialize = "out", deserialize = "in"), default);
        let parsed: AttrArgsParser = syn::parse2(tokens).unwrap();

        let rename = parsed.0.get_list("rename").unwrap();
        assert_eq!(rename.get_string("serialize").as_deref(), Some("out"));
        assert!(has_flag(&parsed.0, "default"));
    }

    #[test]
    fn test_parse_path_value() {
        let tokens = quote!(with = my::module, skip_serializing_if = "Option::is_none");
        let parsed: AttrArgsParser = syn::parse2(tokens).unwrap();

        assert!(matches!(parsed.0.get_value("with"), Some(AttrValue::Tokens)));
        assert!(parsed.0.get_string("skip_serializing_if").is_some());
    }
}
