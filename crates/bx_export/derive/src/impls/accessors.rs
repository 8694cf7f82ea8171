use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{FnArg, ImplItem, ImplItemFn, ItemImpl};

use crate::EXPORT_ATTRIBUTE_NAME;
use crate::attributes::{PropertyAttributes, Target};
use crate::path::{AnyFP, ResultFP};

/// Checks that `method` can be called as `this.method()` on a `&Self`.
fn check_receiver(method: &ImplItemFn) -> syn::Result<()> {
    let sig = &method.sig;
    let Some(FnArg::Receiver(receiver)) = sig.inputs.first() else {
        return Err(syn::Error::new(
            sig.ident.span(),
            "exported accessors take `&self`",
        ));
    };
    if receiver.reference.is_none() || receiver.mutability.is_some() {
        return Err(syn::Error::new(
            receiver.span(),
            "exported accessors take `&self`",
        ));
    }
    if sig.asyncness.is_some() {
        return Err(syn::Error::new(
            sig.asyncness.span(),
            "exported accessors cannot be `async`",
        ));
    }
    if sig.generics.type_params().next().is_some() || sig.generics.const_params().next().is_some()
    {
        return Err(syn::Error::new(
            sig.generics.span(),
            "exported accessors cannot be generic",
        ));
    }
    Ok(())
}

/// Expand `#[export_accessors]` on an inherent impl block.
///
/// Marked methods lose their `#[export]` attributes, and the block gains a
/// getter per accessor plus `__bx_accessors()`, which the struct's
/// description pulls in through `#[export(accessors)]`.
pub(crate) fn impl_accessors(mut item: ItemImpl, bx_export_path: &syn::Path) -> syn::Result<TokenStream> {
    if let Some((_, trait_path, _)) = &item.trait_ {
        return Err(syn::Error::new(
            trait_path.span(),
            "`#[export_accessors]` applies to inherent impl blocks",
        ));
    }

    let retrieved_ = crate::path::retrieved_(bx_export_path);
    let property_error_ = crate::path::property_error_(bx_export_path);
    let macro_exports_ = crate::path::macro_exports_(bx_export_path);
    let property_info_ = crate::path::property_info_(bx_export_path);
    let accessor_set_ = crate::path::accessor_set_(bx_export_path);
    let rejected_accessor_ = crate::path::rejected_accessor_(bx_export_path);

    let mut getters = Vec::new();
    let mut entries = Vec::new();
    let mut names = BTreeSet::new();

    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let attrs = PropertyAttributes::parse_attrs(&method.attrs, Target::Accessor)?;
        if !attrs.exported {
            continue;
        }
        method
            .attrs
            .retain(|attr| !attr.path().is_ident(EXPORT_ATTRIBUTE_NAME));

        let ident = &method.sig.ident;
        let member_name = ident.unraw().to_string();

        if method.sig.receiver().is_some() && method.sig.inputs.len() > 1 {
            let arity = method.sig.inputs.len() - 1;
            entries.push(quote! {
                .with_rejected(#rejected_accessor_::new(#member_name, #arity))
            });
            continue;
        }
        check_receiver(method)?;

        let name = match &attrs.name {
            Some(name) => name.value(),
            None => member_name.clone(),
        };
        if !names.insert(name.clone()) {
            return Err(syn::Error::new(
                ident.span(),
                format!("duplicate export name `{name}`"),
            ));
        }

        let getter = format_ident!("__bx_accessor_{}", member_name);
        let value = if attrs.fallible {
            quote!(this.#ident().map_err(#property_error_::failed)?)
        } else {
            quote!(this.#ident())
        };
        getters.push(quote! {
            #[doc(hidden)]
            #[inline(never)]
            fn #getter(
                bean: &dyn #AnyFP,
            ) -> #ResultFP<#retrieved_<'_>, #property_error_>
            where
                Self: 'static,
            {
                let this = #macro_exports_::downcast_bean::<Self>(bean)?;
                #ResultFP::Ok(#retrieved_::owned(#value))
            }
        });

        let with = attrs.get_expression_with();
        entries.push(quote! {
            .with_property(
                #property_info_::accessor(#member_name, Self::#getter)
                    #with
            )
        });
    }

    let generated: ImplItem = syn::parse_quote! {
        #[doc(hidden)]
        #[allow(dead_code)]
        fn __bx_accessors() -> #accessor_set_
        where
            Self: 'static,
        {
            #accessor_set_::new()
                #(#entries)*
        }
    };

    for getter in getters {
        item.items.push(syn::parse2(getter)?);
    }
    item.items.push(generated);

    Ok(quote!(#item))
}
