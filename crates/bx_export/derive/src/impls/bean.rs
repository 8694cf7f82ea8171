use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{DeriveInput, Fields, Member, Type};

use crate::attributes::{PropertyAttributes, Target, TypeAttributes};
use crate::path::{AnyFP, OptionFP, ResultFP, TypeIdFP};

struct ExportedField<'a> {
    member: Member,
    member_name: String,
    ty: &'a Type,
    attrs: PropertyAttributes,
}

/// Generate `DescribeBean` and `Export` for a struct.
///
/// Getters and the ancestor projection are emitted as hidden associated
/// functions, so that they can be named as `fn` pointers in the
/// description.
pub(crate) fn impl_bean(
    ast: &DeriveInput,
    fields: &Fields,
    attrs: &TypeAttributes,
    bx_export_path: &syn::Path,
) -> syn::Result<TokenStream> {
    if let Some(lifetime) = ast.generics.lifetimes().next() {
        return Err(syn::Error::new(
            lifetime.span(),
            "exported beans cannot borrow, lifetime parameters are not supported",
        ));
    }

    let mut exported = Vec::new();
    let mut extends = None;
    for (index, field) in fields.iter().enumerate() {
        let field_attrs = PropertyAttributes::parse_attrs(&field.attrs, Target::Field)?;
        if !field_attrs.exported {
            continue;
        }
        let (member, member_name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
            None => (Member::Unnamed(index.into()), index.to_string()),
        };
        let exported_field = ExportedField {
            member,
            member_name,
            ty: &field.ty,
            attrs: field_attrs,
        };
        if exported_field.attrs.extends {
            if extends.is_some() {
                return Err(syn::Error::new(
                    field.span(),
                    "only one field can be marked `#[export(extends)]`",
                ));
            }
            extends = Some(exported_field);
        } else {
            exported.push(exported_field);
        }
    }

    let mut names = BTreeSet::new();
    for field in &exported {
        let name = match &field.attrs.name {
            Some(name) => name.value(),
            None => field.member_name.clone(),
        };
        if !names.insert(name.clone()) {
            return Err(syn::Error::new(
                field.ty.span(),
                format!("duplicate export name `{name}`"),
            ));
        }
    }

    let export_ = crate::path::export_(bx_export_path);
    let export_kind_ = crate::path::export_kind_(bx_export_path);
    let describe_bean_ = crate::path::describe_bean_(bx_export_path);
    let retrieved_ = crate::path::retrieved_(bx_export_path);
    let property_error_ = crate::path::property_error_(bx_export_path);
    let macro_exports_ = crate::path::macro_exports_(bx_export_path);
    let bean_info_ = crate::path::bean_info_(bx_export_path);
    let exported_bean_ = crate::path::exported_bean_(bx_export_path);
    let property_info_ = crate::path::property_info_(bx_export_path);
    let parent_info_ = crate::path::parent_info_(bx_export_path);

    let ident = &ast.ident;
    let type_name = ident.unraw().to_string();

    // Every type parameter must itself be exportable and `'static`.
    let mut generics = ast.generics.clone();
    let is_generic = generics.type_params().next().is_some();
    let params: Vec<_> = generics.type_params().map(|p| p.ident.clone()).collect();
    {
        let where_clause = generics.make_where_clause();
        for param in &params {
            where_clause
                .predicates
                .push(syn::parse_quote!(#param: #export_ + 'static));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let getters = exported.iter().map(|field| {
        let getter = format_ident!("__bx_field_{}", field.member_name);
        let member = &field.member;
        quote! {
            #[doc(hidden)]
            #[inline(never)]
            fn #getter(
                bean: &dyn #AnyFP,
            ) -> #ResultFP<#retrieved_<'_>, #property_error_> {
                let this = #macro_exports_::downcast_bean::<Self>(bean)?;
                #ResultFP::Ok(#retrieved_::Borrowed(&this.#member))
            }
        }
    });

    let properties = exported.iter().map(|field| {
        let getter = format_ident!("__bx_field_{}", field.member_name);
        let member_name = &field.member_name;
        let ty = field.ty;
        let with = field.attrs.get_expression_with();
        quote! {
            .with_property(
                #property_info_::field::<#ty>(#member_name, Self::#getter)
                    #with
            )
        }
    });

    let (upcast, with_parent) = match &extends {
        Some(field) => {
            let member = &field.member;
            let ty = field.ty;
            (
                quote! {
                    #[doc(hidden)]
                    fn __bx_upcast(bean: &dyn #AnyFP) -> #OptionFP<&dyn #AnyFP> {
                        match bean.downcast_ref::<Self>() {
                            #OptionFP::Some(this) => #OptionFP::Some(&this.#member as &dyn #AnyFP),
                            #OptionFP::None => #OptionFP::None,
                        }
                    }
                },
                quote! {
                    .with_parent(#parent_info_::new::<#ty>(Self::__bx_upcast))
                },
            )
        }
        None => (TokenStream::new(), TokenStream::new()),
    };

    let with_marker = attrs.bean.map(|default_visibility| {
        if default_visibility == 1 {
            quote!(.with_marker(#exported_bean_::DEFAULT))
        } else {
            quote!(.with_marker(#exported_bean_::new(#default_visibility)))
        }
    });
    let with_accessors = attrs
        .accessors
        .then(|| quote!(.with_accessors(Self::__bx_accessors())));
    let with_docs = attrs.docs.get_expression_with();

    let info_tokens = quote! {
        #bean_info_::new::<Self>(#type_name)
            #with_marker
            #(#properties)*
            #with_accessors
            #with_parent
            #with_docs
    };

    let cell_tokens = if is_generic {
        let cell_ = crate::path::generic_cell_(bx_export_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(|| {
                #info_tokens
            })
        }
    } else {
        let cell_ = crate::path::non_generic_cell_(bx_export_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_init(|| {
                #info_tokens
            })
        }
    };

    Ok(quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#getters)*
            #upcast
        }

        impl #impl_generics #describe_bean_ for #ident #ty_generics #where_clause {
            fn describe() -> &'static #bean_info_ {
                #cell_tokens
            }
        }

        impl #impl_generics #export_ for #ident #ty_generics #where_clause {
            #[inline]
            fn export_kind(&self) -> #export_kind_<'_> {
                #export_kind_::Bean(self)
            }

            #[inline]
            fn declared_type(&self) -> #OptionFP<#TypeIdFP> {
                #OptionFP::Some(#TypeIdFP::of::<Self>())
            }
        }
    })
}
