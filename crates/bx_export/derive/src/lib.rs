//! See following macros:
//!
//! - [`Export`]
//! - [`export_accessors`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, ItemImpl, parse_macro_input};

static EXPORT_ATTRIBUTE_NAME: &str = "export";

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod impls;
mod path;

use attributes::TypeAttributes;

// -----------------------------------------------------------------------------
// Macros

/// # Export Derivation
///
/// ## Beans
///
/// On a struct, `#[derive(Export)]` implements `Export` and `DescribeBean`
/// (and through it `Bean`). Only fields marked `#[export]` are exported.
///
/// ```rust, ignore
/// #[derive(Export)]
/// #[export(bean)]
/// struct Job {
///     #[export]
///     name: String,
///     #[export(name = "tags", visibility = 2)]
///     labels: Vec<String>,
///     secret: String,
/// }
/// ```
///
/// Without the class-level `#[export(bean)]` marker, the struct is
/// described but cannot be exported, unless an ancestor carries the marker.
///
/// `#[export(bean(default_visibility = N))]` gives every field without an
/// explicit visibility the visibility `N` (1 by default).
///
/// ### Field options
///
/// - `name = ".."`: export name, defaults to the field name.
/// - `visibility = N`: `0` means the class default.
/// - `inline`: nested values stay at the depth of the owner.
/// - `verbose_map = "key/value"`: write a map as
///   `[{"key": k, "value": v}, ..]`.
/// - `extends`: this field embeds the ancestor. At most one per struct, and
///   it cannot carry other options.
///
/// Doc comments on the struct and on exported fields are recorded in the
/// description.
///
/// ### Accessors
///
/// `#[export(accessors)]` adds the accessors of the type's
/// [`#[export_accessors]`](macro@export_accessors) block.
///
/// ### Generics
///
/// Every type parameter gets an `Export + 'static` bound. Lifetime
/// parameters are not supported.
///
/// ## Enums
///
/// A fieldless enum exports the name of its variant, overridable with
/// `#[export(name = "..")]` on a variant.
///
/// ## Custom values
///
/// `#[export(custom = method)]` exports `self.method()` in place of the
/// value. It cannot be combined with `bean` or `accessors`.
///
/// ```rust, ignore
/// #[derive(Export)]
/// #[export(custom = as_text)]
/// struct Version(u32, u32);
///
/// impl Version {
///     fn as_text(&self) -> String {
///         format!("{}.{}", self.0, self.1)
///     }
/// }
/// ```
#[proc_macro_derive(Export, attributes(export))]
pub fn derive_export(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let type_attributes = match TypeAttributes::parse_attrs(&ast.attrs) {
        Ok(attrs) => attrs,
        Err(err) => return err.into_compile_error().into(),
    };

    match expand_export(&ast, &type_attributes) {
        Ok(code) => quote! {
            const _: () = {
                #code
            };
        }
        .into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn expand_export(
    ast: &DeriveInput,
    attrs: &TypeAttributes,
) -> syn::Result<proc_macro2::TokenStream> {
    let bx_export_path = path::bx_export();

    if let Some(method) = &attrs.custom {
        if attrs.bean.is_some() || attrs.accessors {
            return Err(syn::Error::new(
                method.span(),
                "`custom` cannot be combined with `bean` or `accessors`",
            ));
        }
        return Ok(impls::impl_custom(ast, method, &bx_export_path));
    }

    match &ast.data {
        Data::Struct(data) => impls::impl_bean(ast, &data.fields, attrs, &bx_export_path),
        Data::Enum(data) => {
            if attrs.bean.is_some() || attrs.accessors {
                return Err(syn::Error::new(
                    ast.ident.span(),
                    "enums export their variant name, `bean` and `accessors` apply to structs",
                ));
            }
            impls::impl_enum(ast, data, &bx_export_path)
        }
        Data::Union(data) => Err(syn::Error::new(
            data.union_token.span,
            "unions cannot derive `Export`",
        )),
    }
}

/// # Exported Accessors
///
/// Applied to an inherent impl block, turns the methods marked `#[export]`
/// into accessor properties of the type. The struct opts in with
/// `#[export(accessors)]`.
///
/// ```rust, ignore
/// #[derive(Export)]
/// #[export(bean, accessors)]
/// struct Job {
///     #[export]
///     name: String,
///     steps: Vec<String>,
/// }
///
/// #[export_accessors]
/// impl Job {
///     #[export]
///     fn step_count(&self) -> usize {
///         self.steps.len()
///     }
///
///     #[export(fallible, visibility = 2)]
///     fn log(&self) -> Result<String, std::io::Error> {
///         std::fs::read_to_string("job.log")
///     }
/// }
/// ```
///
/// Accessors take `&self` and return an exportable value. `fallible`
/// accessors return a `Result` whose error becomes a property retrieval
/// failure. Marked methods that take further arguments are never exported;
/// they are reported with a warning when the type's model is built.
///
/// Each type can have one `#[export_accessors]` block. Field options
/// (`name`, `visibility`, `inline`, `verbose_map`) apply here as well.
#[proc_macro_attribute]
pub fn export_accessors(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        let attr = proc_macro2::TokenStream::from(attr);
        return syn::Error::new_spanned(attr, "`#[export_accessors]` takes no arguments")
            .into_compile_error()
            .into();
    }
    let item = parse_macro_input!(item as ItemImpl);
    let bx_export_path = path::bx_export();

    match impls::impl_accessors(item, &bx_export_path) {
        Ok(code) => code.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
