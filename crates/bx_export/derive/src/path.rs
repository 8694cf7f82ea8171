//! Paths to `bx_export` items used by generated code.
//!
//! Kept in one place so that moving an item in `bx_export` only needs a
//! change here.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the access path to the `bx_export` crate, as the invoking crate
/// sees it.
///
/// 1. For crates that depend on `bx_export`, `::bx_export` is returned.
/// 2. For crates that depend on `bx_core`, `::bx_core::export` is returned.
/// 3. For crates that depend on `bx`, `::bx::export` is returned.
/// 4. For other situations, `::bx_export` is returned.
///
/// This reads the manifest behind a global lock, so it is called once per
/// expansion and the result passed around.
pub(crate) fn bx_export() -> syn::Path {
    bx_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("bx_export"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn macro_exports_(bx_export_path: &syn::Path) -> TokenStream {
    quote! {
        #bx_export_path::__macro_exports
    }
}

#[inline(always)]
pub(crate) fn export_(bx_export_path: &syn::Path) -> TokenStream {
    quote! {
        #bx_export_path::Export
    }
}

#[inline(always)]
pub(crate) fn export_kind_(bx_export_path: &syn::Path) -> TokenStream {
    quote! {
        #bx_export_path::ExportKind
    }
}

#[inline(always)]
pub(crate) fn describe_bean_(bx_export_path: &syn::Path) -> TokenStream {
    quote! {
        #bx_export_path::DescribeBean
    }
}

#[inline(always)]
pub(crate) fn retrieved_(bx_export_path: &syn::Path) -> TokenStream {
    quote! {
        #bx_export_path::Retrieved
    }
}

#[inline(always)]
pub(crate) fn property_error_(bx_export_path: &syn::Path) -> TokenStream {
    quote! {
        #bx_export_path::PropertyError
    }
}

#[inline(always)]
pub(crate) fn bean_info_(bx_export_path: &syn::Path) -> TokenStream {
    quote! {
        #bx_export_path::info::BeanInfo
    }
}

#[inline(always)]
pub(crate) fn exported_bean_(bx_export_path: &syn::Path) -> TokenStream {
    quote! {
        #bx_export_path::info::ExportedBean
    }
}

#[inline(always)]
pub(crate) fn property_info_(bx_export_path: &syn::Path) -> TokenStream {
    quote! {
        #bx_export_path::info::PropertyInfo
    }
}

#[inline(always)]
pub(crate) fn parent_info_(bx_export_path: &syn::Path) -> TokenStream {
    quote! {
        #bx_export_path::info::ParentInfo
    }
}

#[inline(always)]
pub(crate) fn accessor_set_(bx_export_path: &syn::Path) -> TokenStream {
    quote! {
        #bx_export_path::info::AccessorSet
    }
}

#[inline(always)]
pub(crate) fn rejected_accessor_(bx_export_path: &syn::Path) -> TokenStream {
    quote! {
        #bx_export_path::info::RejectedAccessor
    }
}

#[inline(always)]
pub(crate) fn non_generic_cell_(bx_export_path: &syn::Path) -> TokenStream {
    quote! {
        #bx_export_path::info::NonGenericBeanInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_cell_(bx_export_path: &syn::Path) -> TokenStream {
    quote! {
        #bx_export_path::info::GenericBeanInfoCell
    }
}

// -----------------------------------------------------------------------------
// Fully-qualified std items

pub(crate) struct AnyFP;
pub(crate) struct TypeIdFP;
pub(crate) struct OptionFP;
pub(crate) struct ResultFP;

impl quote::ToTokens for AnyFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(quote!(::core::any::Any));
    }
}

impl quote::ToTokens for TypeIdFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(quote!(::core::any::TypeId));
    }
}

impl quote::ToTokens for OptionFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(quote!(::core::option::Option));
    }
}

impl quote::ToTokens for ResultFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(quote!(::core::result::Result));
    }
}
