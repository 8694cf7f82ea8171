//! Parsing of `#[export(..)]` and `#[doc = ".."]` attributes.

use proc_macro2::TokenStream;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, ExprLit, Ident, Lit, LitInt, LitStr, Meta, Token};

use crate::EXPORT_ATTRIBUTE_NAME;
use crate::path::OptionFP;

// -----------------------------------------------------------------------------
// Docs

/// Documentation collected from `#[doc = "..."]`, including `/// ...`.
///
/// One leading space of each line is dropped, so `/// Text.` reads
/// `Text.`.
#[derive(Debug, Default)]
pub(crate) struct Docs {
    lines: Vec<String>,
}

impl Docs {
    fn parse(&mut self, meta: &Meta) -> syn::Result<()> {
        let Meta::NameValue(pair) = meta else {
            return Ok(());
        };
        match &pair.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit_str),
                ..
            }) => {
                let value = lit_str.value();
                let line = value.strip_prefix(' ').unwrap_or(&value);
                self.lines.push(line.to_owned());
                Ok(())
            }
            // `#[doc = include_str!(..)]` and friends are not captured.
            _ => Ok(()),
        }
    }

    fn doc_string(&self) -> Option<String> {
        if self.lines.iter().all(|line| line.trim().is_empty()) {
            return None;
        }
        Some(self.lines.join("\n"))
    }

    /// Empty when there are no docs, otherwise:
    ///
    /// ```ignore
    /// .with_docs(::core::option::Option::Some("......"))
    /// ```
    pub fn get_expression_with(&self) -> TokenStream {
        match self.doc_string() {
            Some(doc) => quote! {
                .with_docs(#OptionFP::Some(#doc))
            },
            None => TokenStream::new(),
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers

#[inline]
fn is_export(attr: &Attribute) -> bool {
    attr.path().is_ident(EXPORT_ATTRIBUTE_NAME)
}

/// Parses `= N` where `N` may be negative.
fn parse_i32(meta: &ParseNestedMeta) -> syn::Result<i32> {
    let input = meta.value()?;
    let negative = input.parse::<Option<Token![-]>>()?.is_some();
    let lit: LitInt = input.parse()?;
    let value: i32 = lit.base10_parse()?;
    Ok(if negative { -value } else { value })
}

fn parse_name(meta: &ParseNestedMeta) -> syn::Result<LitStr> {
    let name: LitStr = meta.value()?.parse()?;
    if name.value().is_empty() {
        return Err(syn::Error::new(name.span(), "export name cannot be empty"));
    }
    Ok(name)
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes on the deriving type.
///
/// - `#[export(bean)]`, `#[export(bean(default_visibility = N))]`
/// - `#[export(accessors)]`
/// - `#[export(custom = method)]`
#[derive(Debug, Default)]
pub(crate) struct TypeAttributes {
    /// Default visibility of the class-level marker, if present.
    pub bean: Option<i32>,
    pub accessors: bool,
    pub custom: Option<Ident>,
    pub docs: Docs,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident("doc") {
                this.docs.parse(&attr.meta)?;
            } else if is_export(attr) {
                attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
            }
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("bean") {
            let mut default_visibility = 1;
            if meta.input.peek(syn::token::Paren) {
                meta.parse_nested_meta(|inner| {
                    if inner.path.is_ident("default_visibility") {
                        default_visibility = parse_i32(&inner)?;
                        Ok(())
                    } else {
                        Err(inner.error("expected `default_visibility`"))
                    }
                })?;
            }
            self.bean = Some(default_visibility);
            Ok(())
        } else if meta.path.is_ident("accessors") {
            self.accessors = true;
            Ok(())
        } else if meta.path.is_ident("custom") {
            self.custom = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("expected `bean`, `accessors` or `custom`"))
        }
    }
}

// -----------------------------------------------------------------------------
// PropertyAttributes

/// Where a member-level `#[export]` was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Field,
    Accessor,
}

/// Attributes on a field or an accessor method.
///
/// - `#[export]`
/// - `#[export(name = "..", visibility = N, inline, verbose_map = "key/value")]`
/// - `#[export(extends)]` (fields only)
/// - `#[export(fallible)]` (accessors only)
#[derive(Debug, Default)]
pub(crate) struct PropertyAttributes {
    pub exported: bool,
    pub name: Option<LitStr>,
    pub visibility: Option<i32>,
    pub inline: bool,
    pub verbose_map: Option<(String, String)>,
    pub extends: bool,
    pub fallible: bool,
    pub docs: Docs,
}

impl PropertyAttributes {
    pub fn parse_attrs(attrs: &[Attribute], target: Target) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident("doc") {
                this.docs.parse(&attr.meta)?;
                continue;
            }
            if !is_export(attr) {
                continue;
            }
            this.exported = true;
            if let Meta::List(_) = &attr.meta {
                attr.parse_nested_meta(|meta| this.parse_meta(meta, target))?;
            }
        }
        if this.extends && (this.name.is_some() || this.visibility.is_some() || this.inline) {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                "`extends` cannot be combined with other export options",
            ));
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta, target: Target) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            self.name = Some(parse_name(&meta)?);
        } else if meta.path.is_ident("visibility") {
            self.visibility = Some(parse_i32(&meta)?);
        } else if meta.path.is_ident("inline") {
            self.inline = true;
        } else if meta.path.is_ident("verbose_map") {
            let lit: LitStr = meta.value()?.parse()?;
            let value = lit.value();
            // Segments past the second are ignored.
            let mut parts = value.split('/');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) if !key.is_empty() && !value.is_empty() => {
                    self.verbose_map = Some((key.to_owned(), value.to_owned()));
                }
                _ => {
                    return Err(syn::Error::new(
                        lit.span(),
                        "expected `verbose_map = \"key/value\"`",
                    ));
                }
            }
        } else if meta.path.is_ident("extends") && target == Target::Field {
            self.extends = true;
        } else if meta.path.is_ident("fallible") && target == Target::Accessor {
            self.fallible = true;
        } else {
            return Err(meta.error(match target {
                Target::Field => "expected `name`, `visibility`, `inline`, `verbose_map` or `extends`",
                Target::Accessor => {
                    "expected `name`, `visibility`, `inline`, `verbose_map` or `fallible`"
                }
            }));
        }
        Ok(())
    }

    /// The builder calls shared by field and accessor properties:
    ///
    /// ```ignore
    /// .with_name("..").with_visibility(2).with_inline(true)
    ///     .with_verbose_map("key", "value").with_docs(..)
    /// ```
    pub fn get_expression_with(&self) -> TokenStream {
        let name = self.name.as_ref().map(|name| quote!(.with_name(#name)));
        let visibility = self.visibility.map(|v| quote!(.with_visibility(#v)));
        let inline = self.inline.then(|| quote!(.with_inline(true)));
        let verbose_map = self
            .verbose_map
            .as_ref()
            .map(|(key, value)| quote!(.with_verbose_map(#key, #value)));
        let docs = self.docs.get_expression_with();
        quote! {
            #name #visibility #inline #verbose_map #docs
        }
    }
}

// -----------------------------------------------------------------------------
// VariantAttributes

/// `#[export(name = "..")]` on an enum variant.
#[derive(Debug, Default)]
pub(crate) struct VariantAttributes {
    pub name: Option<LitStr>,
}

impl VariantAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs.iter().filter(|attr| is_export(attr)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    this.name = Some(parse_name(&meta)?);
                    Ok(())
                } else {
                    Err(meta.error("expected `name`"))
                }
            })?;
        }
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn type_attributes() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[doc = " A job."]),
            parse_quote!(#[export(bean(default_visibility = -2), accessors)]),
        ];
        let parsed = TypeAttributes::parse_attrs(&attrs).unwrap();
        assert_eq!(parsed.bean, Some(-2));
        assert!(parsed.accessors);
        assert_eq!(parsed.docs.doc_string().as_deref(), Some("A job."));

        let plain: Vec<Attribute> = vec![parse_quote!(#[export(bean)])];
        assert_eq!(TypeAttributes::parse_attrs(&plain).unwrap().bean, Some(1));
    }

    #[test]
    fn property_attributes() {
        let attrs: Vec<Attribute> = vec![parse_quote!(
            #[export(name = "label", visibility = 3, inline, verbose_map = "k/v")]
        )];
        let parsed = PropertyAttributes::parse_attrs(&attrs, Target::Field).unwrap();
        assert!(parsed.exported);
        assert_eq!(parsed.name.unwrap().value(), "label");
        assert_eq!(parsed.visibility, Some(3));
        assert!(parsed.inline);
        assert_eq!(parsed.verbose_map, Some(("k".into(), "v".into())));
    }

    #[test]
    fn bare_marker() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[export])];
        let parsed = PropertyAttributes::parse_attrs(&attrs, Target::Accessor).unwrap();
        assert!(parsed.exported);
        assert!(parsed.name.is_none());

        let none: Vec<Attribute> = vec![parse_quote!(#[serde(skip)])];
        assert!(!PropertyAttributes::parse_attrs(&none, Target::Field).unwrap().exported);
    }

    #[test]
    fn rejects_misplaced_options() {
        let fallible: Vec<Attribute> = vec![parse_quote!(#[export(fallible)])];
        assert!(PropertyAttributes::parse_attrs(&fallible, Target::Field).is_err());

        let extends: Vec<Attribute> = vec![parse_quote!(#[export(extends)])];
        assert!(PropertyAttributes::parse_attrs(&extends, Target::Accessor).is_err());

        let mixed: Vec<Attribute> = vec![parse_quote!(#[export(extends, inline)])];
        assert!(PropertyAttributes::parse_attrs(&mixed, Target::Field).is_err());

        let map: Vec<Attribute> = vec![parse_quote!(#[export(verbose_map = "kv")])];
        assert!(PropertyAttributes::parse_attrs(&map, Target::Field).is_err());

        let empty: Vec<Attribute> = vec![parse_quote!(#[export(verbose_map = "/v")])];
        assert!(PropertyAttributes::parse_attrs(&empty, Target::Field).is_err());
    }

    #[test]
    fn verbose_map_uses_first_two_segments() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[export(verbose_map = "a/b/c")])];
        let parsed = PropertyAttributes::parse_attrs(&attrs, Target::Field).unwrap();
        assert_eq!(parsed.verbose_map, Some(("a".into(), "b".into())));
    }
}
