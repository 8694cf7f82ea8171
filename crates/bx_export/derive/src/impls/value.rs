use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{DataEnum, DeriveInput, Fields, Ident};

use crate::attributes::VariantAttributes;

/// Generate `Export` for a fieldless enum: each variant writes its name.
pub(crate) fn impl_enum(
    ast: &DeriveInput,
    data: &DataEnum,
    bx_export_path: &syn::Path,
) -> syn::Result<TokenStream> {
    let export_ = crate::path::export_(bx_export_path);
    let export_kind_ = crate::path::export_kind_(bx_export_path);
    let macro_exports_ = crate::path::macro_exports_(bx_export_path);

    let mut arms = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.fields.span(),
                "only fieldless enums derive `Export`, use `#[export(custom = ..)]` instead",
            ));
        }
        let attrs = VariantAttributes::parse_attrs(&variant.attrs)?;
        let name = match attrs.name {
            Some(name) => name.value(),
            None => variant.ident.unraw().to_string(),
        };
        let ident = &variant.ident;
        arms.push(quote! {
            Self::#ident => #macro_exports_::enum_name(#name),
        });
    }

    let ident = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #export_ for #ident #ty_generics #where_clause {
            fn export_kind(&self) -> #export_kind_<'_> {
                match *self {
                    #(#arms)*
                }
            }
        }
    })
}

/// Generate `Export` for `#[export(custom = method)]`: the value of
/// `method(&self)` is exported in place of the type.
pub(crate) fn impl_custom(
    ast: &DeriveInput,
    method: &Ident,
    bx_export_path: &syn::Path,
) -> TokenStream {
    let export_ = crate::path::export_(bx_export_path);
    let export_kind_ = crate::path::export_kind_(bx_export_path);
    let retrieved_ = crate::path::retrieved_(bx_export_path);

    let ident = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    quote! {
        impl #impl_generics #export_ for #ident #ty_generics #where_clause {
            #[inline]
            fn export_kind(&self) -> #export_kind_<'_> {
                #export_kind_::Custom(#retrieved_::owned(self.#method()))
            }
        }
    }
}
